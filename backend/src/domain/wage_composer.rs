//! Gross and net wage composition.
//!
//! Combines the day wages, hour wages, other considerations and NIC/Tax
//! totals into the final gross and net figures on both ledgers. Cash-side
//! wages are by construction NI/tax-exempt, so only the NI side carries
//! withholdings.

use crate::domain::models::wage::{
    ComposedWage, ConsiderationTotals, DailyWageResult, HourlyWageResult, NicTaxTotals,
};

/// Service that composes the final gross/net totals of a breakdown
#[derive(Clone, Default)]
pub struct GrossNetWageComposer;

impl GrossNetWageComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose gross and net wages. A negative NI-side net wage is a
    /// warning on the result, never an error: the breakdown is still
    /// produced and flagged for review.
    pub fn compose(
        &self,
        daily: &DailyWageResult,
        hourly: &HourlyWageResult,
        considerations: &ConsiderationTotals,
        nic_tax: &NicTaxTotals,
    ) -> ComposedWage {
        let gross_ni_wage = daily.ni_days_wage
            + daily.ni_extra_shift_wage
            + hourly.ni_hours_wage
            + considerations.ni_adjustment;
        let gross_cash_wage = daily.cash_days_wage
            + daily.cash_extra_shift_wage
            + hourly.cash_hours_wage
            + considerations.cash_adjustment;

        let net_ni_wage = gross_ni_wage - nic_tax.ees_nic - nic_tax.ees_tax;
        let net_cash_wage = gross_cash_wage;

        let mut warnings = Vec::new();
        if net_ni_wage < 0.0 {
            warnings.push(format!(
                "negative NI-side net wage: {:.2} (withholdings exceed NI-side gross)",
                net_ni_wage
            ));
        }

        ComposedWage {
            gross_ni_wage,
            gross_cash_wage,
            total_gross_wage: gross_ni_wage + gross_cash_wage,
            net_ni_wage,
            net_cash_wage,
            total_net_wage: net_ni_wage + net_cash_wage,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> GrossNetWageComposer {
        GrossNetWageComposer::new()
    }

    #[test]
    fn test_composition_formulas() {
        let daily = DailyWageResult {
            ni_days_wage: 370.0,
            ni_extra_shift_wage: 20.0,
            cash_days_wage: 100.0,
            ..Default::default()
        };
        let hourly = HourlyWageResult {
            ni_hours_wage: 200.0,
            cash_hours_wage: 64.0,
            ..Default::default()
        };
        let considerations = ConsiderationTotals {
            ni_adjustment: 50.0,
            cash_adjustment: -10.0,
            ..Default::default()
        };
        let nic_tax = NicTaxTotals {
            er_nic: 70.0,
            ees_nic: 60.0,
            ees_tax: 110.0,
        };

        let composed = composer().compose(&daily, &hourly, &considerations, &nic_tax);

        assert_eq!(composed.gross_ni_wage, 370.0 + 20.0 + 200.0 + 50.0);
        assert_eq!(composed.gross_cash_wage, 100.0 + 64.0 - 10.0);
        assert_eq!(
            composed.total_gross_wage,
            composed.gross_ni_wage + composed.gross_cash_wage
        );
        // Withholdings only touch the NI side; employer NIC touches neither
        assert_eq!(composed.net_ni_wage, 640.0 - 60.0 - 110.0);
        assert_eq!(composed.net_cash_wage, composed.gross_cash_wage);
        assert_eq!(
            composed.total_net_wage,
            composed.net_ni_wage + composed.net_cash_wage
        );
        assert!(composed.warnings.is_empty());
    }

    #[test]
    fn test_negative_net_is_a_warning_not_an_error() {
        let hourly = HourlyWageResult {
            ni_hours_wage: 50.0,
            ..Default::default()
        };
        let nic_tax = NicTaxTotals {
            er_nic: 0.0,
            ees_nic: 40.0,
            ees_tax: 30.0,
        };

        let composed = composer().compose(
            &DailyWageResult::default(),
            &hourly,
            &ConsiderationTotals::default(),
            &nic_tax,
        );

        assert_eq!(composed.net_ni_wage, -20.0);
        assert_eq!(composed.warnings.len(), 1);
        assert!(composed.warnings[0].contains("negative NI-side net wage"));
    }

    #[test]
    fn test_all_zero_inputs_compose_to_zero() {
        let composed = composer().compose(
            &DailyWageResult::default(),
            &HourlyWageResult::default(),
            &ConsiderationTotals::default(),
            &NicTaxTotals::default(),
        );

        assert_eq!(composed.total_gross_wage, 0.0);
        assert_eq!(composed.total_net_wage, 0.0);
        assert!(composed.warnings.is_empty());
    }
}
