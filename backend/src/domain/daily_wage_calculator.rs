//! Daily wage calculation.
//!
//! Converts attendance days and extra shifts plus the daily-rate
//! configuration into NI-side and cash-side wage amounts. The two sides
//! never compete for the same attendance figures: both read the same raw
//! `days_worked` and apply independent rate tables.

use crate::domain::models::errors::WageComputeError;
use crate::domain::models::wage::DailyWageResult;
use shared::{CashDayMode, DailyRatesConfig, NiDayMode};

/// Service that computes day-based wages for one employee over a period
#[derive(Clone, Default)]
pub struct DailyWageCalculator;

impl DailyWageCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute both sides' day wages from total attendance over the period.
    ///
    /// `days_worked` and `extra_shift_worked` must be non-negative; a
    /// negative figure is a data error and aborts the employee's breakdown.
    pub fn calculate(
        &self,
        config: &DailyRatesConfig,
        days_worked: f64,
        extra_shift_worked: f64,
    ) -> Result<DailyWageResult, WageComputeError> {
        if days_worked < 0.0 {
            return Err(WageComputeError::InvalidEntry(format!(
                "days worked cannot be negative: {}",
                days_worked
            )));
        }
        if extra_shift_worked < 0.0 {
            return Err(WageComputeError::InvalidEntry(format!(
                "extra shifts worked cannot be negative: {}",
                extra_shift_worked
            )));
        }
        self.validate(config)?;

        let mut result = DailyWageResult::default();

        match config.ni_day_mode {
            NiDayMode::None => {}
            NiDayMode::Fixed => {
                // Guaranteed wage, independent of attendance variance
                result.ni_days_wage = config.ni_regular_day_rate * config.ni_regular_days;
            }
            NiDayMode::All => {
                let regular_used = days_worked.min(config.ni_regular_days);
                let extra_used = (days_worked - config.ni_regular_days).max(0.0);
                result.ni_days_wage = regular_used * config.ni_regular_day_rate
                    + extra_used * config.ni_extra_day_rate;
                result.ni_extra_shift_wage = extra_shift_worked * config.ni_extra_shift_rate;
            }
        }

        match config.cash_day_mode {
            CashDayMode::None => {}
            CashDayMode::All => {
                let regular_used = days_worked.min(config.cash_regular_days);
                let extra_used = (days_worked - config.cash_regular_days).max(0.0);
                result.cash_days_wage = regular_used * config.cash_regular_day_rate
                    + extra_used * config.cash_extra_day_rate;
                result.cash_extra_shift_wage = extra_shift_worked * config.cash_extra_shift_rate;
            }
        }

        // The regular/extra day split is reported from whichever side
        // consumed the attendance; with no ALL side there is nothing to
        // split against.
        let (regular_used, extra_used) = if config.ni_day_mode == NiDayMode::All {
            (
                days_worked.min(config.ni_regular_days),
                (days_worked - config.ni_regular_days).max(0.0),
            )
        } else if config.cash_day_mode == CashDayMode::All {
            (
                days_worked.min(config.cash_regular_days),
                (days_worked - config.cash_regular_days).max(0.0),
            )
        } else {
            (days_worked, 0.0)
        };
        result.regular_days_used = regular_used;
        result.extra_days_used = extra_used;

        Ok(result)
    }

    /// Mode invariants of the daily sub-config
    fn validate(&self, config: &DailyRatesConfig) -> Result<(), WageComputeError> {
        if config.ni_day_mode == NiDayMode::All && config.cash_day_mode == CashDayMode::All {
            return Err(WageComputeError::Configuration(
                "NI and cash day modes cannot both be ALL: ambiguous which side excess days apply to"
                    .to_string(),
            ));
        }
        if config.ni_day_mode == NiDayMode::Fixed
            && (config.ni_extra_day_rate != 0.0 || config.ni_extra_shift_rate != 0.0)
        {
            return Err(WageComputeError::Configuration(
                "extra day and extra shift rates are not applicable in FIXED day mode".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> DailyWageCalculator {
        DailyWageCalculator::new()
    }

    fn all_mode_config() -> DailyRatesConfig {
        DailyRatesConfig {
            ni_day_mode: NiDayMode::All,
            ni_regular_days: 5.0,
            ni_regular_day_rate: 50.0,
            ni_extra_day_rate: 60.0,
            ni_extra_shift_rate: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_mode_splits_regular_and_extra_days() {
        // 7 days against 5 regular: 5 regular + 2 extra, plus 1 extra shift
        let result = calculator()
            .calculate(&all_mode_config(), 7.0, 1.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.regular_days_used, 5.0);
        assert_eq!(result.extra_days_used, 2.0);
        assert_eq!(result.ni_days_wage, 5.0 * 50.0 + 2.0 * 60.0);
        assert_eq!(result.ni_extra_shift_wage, 20.0);
        assert_eq!(result.cash_days_wage, 0.0);
        assert_eq!(result.gross_days_wage(), 370.0);
        assert_eq!(result.extra_shift_wage(), 20.0);
    }

    #[test]
    fn test_all_mode_under_regular_days() {
        let result = calculator()
            .calculate(&all_mode_config(), 3.0, 0.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.regular_days_used, 3.0);
        assert_eq!(result.extra_days_used, 0.0);
        assert_eq!(result.ni_days_wage, 150.0);
        assert_eq!(result.extra_shift_wage(), 0.0);
    }

    #[test]
    fn test_fixed_mode_is_attendance_independent() {
        let config = DailyRatesConfig {
            ni_day_mode: NiDayMode::Fixed,
            ni_regular_days: 5.0,
            ni_regular_day_rate: 50.0,
            ..Default::default()
        };

        let none_worked = calculator()
            .calculate(&config, 0.0, 0.0)
            .expect("Failed to calculate daily wage");
        let many_worked = calculator()
            .calculate(&config, 20.0, 3.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(none_worked.ni_days_wage, 250.0);
        assert_eq!(many_worked.ni_days_wage, 250.0);
        assert_eq!(many_worked.extra_shift_wage(), 0.0);
    }

    #[test]
    fn test_fixed_mode_rejects_extra_rates() {
        let config = DailyRatesConfig {
            ni_day_mode: NiDayMode::Fixed,
            ni_regular_days: 5.0,
            ni_regular_day_rate: 50.0,
            ni_extra_day_rate: 60.0,
            ..Default::default()
        };

        let result = calculator().calculate(&config, 5.0, 0.0);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not applicable in FIXED"));
    }

    #[test]
    fn test_none_mode_contributes_nothing() {
        let result = calculator()
            .calculate(&DailyRatesConfig::default(), 7.0, 2.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.ni_days_wage, 0.0);
        assert_eq!(result.cash_days_wage, 0.0);
        assert_eq!(result.extra_shift_wage(), 0.0);
        // No side consumed the attendance, so no regular/extra split applies
        assert_eq!(result.regular_days_used, 7.0);
        assert_eq!(result.extra_days_used, 0.0);
    }

    #[test]
    fn test_cash_all_mode() {
        let config = DailyRatesConfig {
            cash_day_mode: CashDayMode::All,
            cash_regular_days: 4.0,
            cash_regular_day_rate: 40.0,
            cash_extra_day_rate: 45.0,
            cash_extra_shift_rate: 15.0,
            ..Default::default()
        };

        let result = calculator()
            .calculate(&config, 6.0, 2.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.cash_days_wage, 4.0 * 40.0 + 2.0 * 45.0);
        assert_eq!(result.cash_extra_shift_wage, 30.0);
        assert_eq!(result.ni_days_wage, 0.0);
        assert_eq!(result.regular_days_used, 4.0);
        assert_eq!(result.extra_days_used, 2.0);
    }

    #[test]
    fn test_fixed_ni_with_cash_all_is_allowed() {
        let config = DailyRatesConfig {
            ni_day_mode: NiDayMode::Fixed,
            ni_regular_days: 5.0,
            ni_regular_day_rate: 30.0,
            cash_day_mode: CashDayMode::All,
            cash_regular_days: 5.0,
            cash_regular_day_rate: 20.0,
            cash_extra_day_rate: 25.0,
            ..Default::default()
        };

        let result = calculator()
            .calculate(&config, 6.0, 0.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.ni_days_wage, 150.0);
        assert_eq!(result.cash_days_wage, 5.0 * 20.0 + 1.0 * 25.0);
    }

    #[test]
    fn test_both_sides_all_is_rejected() {
        let config = DailyRatesConfig {
            ni_day_mode: NiDayMode::All,
            cash_day_mode: CashDayMode::All,
            ..Default::default()
        };

        let result = calculator().calculate(&config, 5.0, 0.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("both be ALL"));
    }

    #[test]
    fn test_negative_days_are_rejected() {
        let result = calculator().calculate(&all_mode_config(), -1.0, 0.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be negative"));

        let result = calculator().calculate(&all_mode_config(), 5.0, -2.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_zero_attendance_produces_zero_wages() {
        let result = calculator()
            .calculate(&all_mode_config(), 0.0, 0.0)
            .expect("Failed to calculate daily wage");

        assert_eq!(result.gross_days_wage(), 0.0);
        assert_eq!(result.extra_shift_wage(), 0.0);
        assert_eq!(result.regular_days_used, 0.0);
        assert_eq!(result.extra_days_used, 0.0);
    }
}
