//! Hourly wage calculation.
//!
//! Converts total worked hours plus the hourly-rate configuration into
//! NI-side and cash-side wage amounts. Unlike daily rates, the two sides
//! here CAN compete for the same hours, which is why the REST cash mode
//! exists: it pays exactly the hours the NI side did not claim.

use crate::domain::models::errors::WageComputeError;
use crate::domain::models::wage::HourlyWageResult;
use shared::{CashHoursMode, HourlyRatesConfig, NiHoursMode};

/// Service that computes hour-based wages for one employee over a period
#[derive(Clone, Default)]
pub struct HourlyWageCalculator;

impl HourlyWageCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute both sides' hour wages from total worked hours over the
    /// period. `hours_worked` must be non-negative.
    pub fn calculate(
        &self,
        config: &HourlyRatesConfig,
        hours_worked: f64,
    ) -> Result<HourlyWageResult, WageComputeError> {
        if hours_worked < 0.0 {
            return Err(WageComputeError::InvalidEntry(format!(
                "hours worked cannot be negative: {}",
                hours_worked
            )));
        }
        self.validate(config)?;

        let mut result = HourlyWageResult::default();

        match config.ni_hours_mode {
            NiHoursMode::None => {}
            NiHoursMode::All => {
                result.ni_hours_used = hours_worked;
                result.ni_hours_wage = hours_worked * config.ni_rate_per_hour;
            }
            NiHoursMode::Fixed => {
                // Attendance-independent, mirroring the daily FIXED mode
                result.ni_hours_used = config.fixed_ni_hours;
                result.ni_hours_wage = config.fixed_ni_hours * config.ni_rate_per_hour;
            }
            NiHoursMode::Custom => {
                let used = hours_worked.clamp(config.min_ni_hours, config.max_ni_hours);
                result.ni_hours_used = used;
                // The percentage scales the clamped hour count, modelling
                // partially NI-eligible pay
                result.ni_hours_wage =
                    used * config.percentage_ni_hours / 100.0 * config.ni_rate_per_hour;
            }
        }

        match config.cash_hours_mode {
            CashHoursMode::None => {}
            CashHoursMode::All => {
                result.cash_hours_used = hours_worked;
                result.cash_hours_wage = hours_worked * config.cash_rate_per_hour;
            }
            CashHoursMode::Custom => {
                let used = hours_worked.clamp(config.min_cash_hours, config.max_cash_hours);
                result.cash_hours_used = used;
                result.cash_hours_wage =
                    used * config.percentage_cash_hours / 100.0 * config.cash_rate_per_hour;
            }
            CashHoursMode::Rest => {
                // Cash pays exactly the hours the NI side did not claim.
                // A FIXED NI claim can exceed the worked hours; the
                // complement floors at zero.
                let used = (hours_worked - result.ni_hours_used).max(0.0);
                result.cash_hours_used = used;
                result.cash_hours_wage = used * config.cash_rate_per_hour;
            }
        }

        Ok(result)
    }

    /// Mode invariants of the hourly sub-config
    fn validate(&self, config: &HourlyRatesConfig) -> Result<(), WageComputeError> {
        if config.cash_hours_mode == CashHoursMode::All
            && matches!(config.ni_hours_mode, NiHoursMode::All | NiHoursMode::Custom)
        {
            return Err(WageComputeError::Configuration(
                "cash hours mode ALL cannot coexist with an NI mode that claims hours; use REST"
                    .to_string(),
            ));
        }
        if config.ni_hours_mode == NiHoursMode::Custom && config.min_ni_hours > config.max_ni_hours
        {
            return Err(WageComputeError::Configuration(format!(
                "minimum NI hours {} exceeds maximum {}",
                config.min_ni_hours, config.max_ni_hours
            )));
        }
        if config.cash_hours_mode == CashHoursMode::Custom
            && config.min_cash_hours > config.max_cash_hours
        {
            return Err(WageComputeError::Configuration(format!(
                "minimum cash hours {} exceeds maximum {}",
                config.min_cash_hours, config.max_cash_hours
            )));
        }
        Ok(())
    }
}
