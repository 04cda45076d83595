//! Pay structure validation and canonicalization.
//!
//! An employee's raw pay structure carries every rate field regardless of
//! the selected modes. The resolver rejects structurally invalid
//! configurations and zeroes every field not applicable to the selected
//! modes, so the calculators can do arithmetic on it directly.

use crate::domain::models::errors::WageComputeError;
use shared::{
    CashDayMode, CashHoursMode, DailyRatesConfig, HourlyRatesConfig, NiDayMode, NiHoursMode,
    OtherConsiderations, PayStructure,
};

/// Service that validates and normalizes pay structure configuration
#[derive(Clone, Default)]
pub struct PayStructureResolver;

impl PayStructureResolver {
    pub fn new() -> Self {
        Self
    }

    /// Validate the employee-level daily/hourly exclusivity and return the
    /// canonical form of the structure with all inapplicable fields zeroed.
    ///
    /// Mode invariants inside the daily and hourly sub-configs are the
    /// calculators' responsibility, not the resolver's.
    pub fn resolve(&self, structure: &PayStructure) -> Result<PayStructure, WageComputeError> {
        if structure.has_daily_rates && structure.has_hourly_rates {
            return Err(WageComputeError::Configuration(
                "daily rates and hourly rates are mutually exclusive".to_string(),
            ));
        }

        let mut resolved = structure.clone();

        resolved.daily_rates = if resolved.has_daily_rates {
            Self::canonical_daily(&resolved.daily_rates)
        } else {
            DailyRatesConfig::default()
        };

        resolved.hourly_rates = if resolved.has_hourly_rates {
            Self::canonical_hourly(&resolved.hourly_rates)
        } else {
            HourlyRatesConfig::default()
        };

        if !resolved.has_other_considerations {
            resolved.other_considerations = OtherConsiderations::default();
        }

        Ok(resolved)
    }

    fn canonical_daily(config: &DailyRatesConfig) -> DailyRatesConfig {
        let mut canonical = config.clone();

        match canonical.ni_day_mode {
            NiDayMode::None => {
                canonical.ni_regular_days = 0.0;
                canonical.ni_regular_day_rate = 0.0;
                canonical.ni_extra_day_rate = 0.0;
                canonical.ni_extra_shift_rate = 0.0;
            }
            NiDayMode::Fixed => {
                // Extra days and shifts only exist in ALL mode
                canonical.ni_extra_day_rate = 0.0;
                canonical.ni_extra_shift_rate = 0.0;
            }
            NiDayMode::All => {}
        }

        match canonical.cash_day_mode {
            CashDayMode::None => {
                canonical.cash_regular_days = 0.0;
                canonical.cash_regular_day_rate = 0.0;
                canonical.cash_extra_day_rate = 0.0;
                canonical.cash_extra_shift_rate = 0.0;
            }
            CashDayMode::All => {}
        }

        canonical
    }

    fn canonical_hourly(config: &HourlyRatesConfig) -> HourlyRatesConfig {
        let mut canonical = config.clone();

        match canonical.ni_hours_mode {
            NiHoursMode::None => {
                canonical.min_ni_hours = 0.0;
                canonical.max_ni_hours = 0.0;
                canonical.percentage_ni_hours = 0.0;
                canonical.fixed_ni_hours = 0.0;
                canonical.ni_rate_per_hour = 0.0;
            }
            NiHoursMode::All => {
                canonical.min_ni_hours = 0.0;
                canonical.max_ni_hours = 0.0;
                canonical.percentage_ni_hours = 0.0;
                canonical.fixed_ni_hours = 0.0;
            }
            NiHoursMode::Fixed => {
                canonical.min_ni_hours = 0.0;
                canonical.max_ni_hours = 0.0;
                canonical.percentage_ni_hours = 0.0;
            }
            NiHoursMode::Custom => {
                canonical.fixed_ni_hours = 0.0;
            }
        }

        match canonical.cash_hours_mode {
            CashHoursMode::None => {
                canonical.min_cash_hours = 0.0;
                canonical.max_cash_hours = 0.0;
                canonical.percentage_cash_hours = 0.0;
                canonical.cash_rate_per_hour = 0.0;
            }
            CashHoursMode::All | CashHoursMode::Rest => {
                canonical.min_cash_hours = 0.0;
                canonical.max_cash_hours = 0.0;
                canonical.percentage_cash_hours = 0.0;
            }
            CashHoursMode::Custom => {}
        }

        canonical
    }
}
