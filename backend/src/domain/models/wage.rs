//! Intermediate wage figures passed between the calculators.
//!
//! These are internal working values, not wire types: the pay run service
//! folds them into the persisted `WageBreakdown` DTO at the end of a
//! computation.

/// Output of the daily wage calculator.
///
/// The extra-shift components are kept per side so the composer can fold
/// them into the correct gross ledger; the breakdown reports their sum as a
/// single extra-shift figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyWageResult {
    pub regular_days_used: f64,
    pub extra_days_used: f64,
    pub ni_days_wage: f64,
    pub cash_days_wage: f64,
    pub ni_extra_shift_wage: f64,
    pub cash_extra_shift_wage: f64,
}

impl DailyWageResult {
    /// Sum of both sides' day wages, excluding extra shifts
    pub fn gross_days_wage(&self) -> f64 {
        self.ni_days_wage + self.cash_days_wage
    }

    /// Sum of both sides' extra-shift pay
    pub fn extra_shift_wage(&self) -> f64 {
        self.ni_extra_shift_wage + self.cash_extra_shift_wage
    }
}

/// Output of the hourly wage calculator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlyWageResult {
    pub ni_hours_used: f64,
    pub cash_hours_used: f64,
    pub ni_hours_wage: f64,
    pub cash_hours_wage: f64,
}

impl HourlyWageResult {
    pub fn gross_hours_wage(&self) -> f64 {
        self.ni_hours_wage + self.cash_hours_wage
    }
}

/// Output of the other-considerations applier.
///
/// Adjustments are signed net effects on each side's gross; the
/// additions/deductions totals are the unsigned sums reported on the
/// breakdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsiderationTotals {
    pub ni_adjustment: f64,
    pub cash_adjustment: f64,
    pub total_additions: f64,
    pub total_deductions: f64,
}

/// Output of the NIC/Tax aggregator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NicTaxTotals {
    pub er_nic: f64,
    pub ees_nic: f64,
    pub ees_tax: f64,
}

/// Output of the gross/net composer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposedWage {
    pub gross_ni_wage: f64,
    pub gross_cash_wage: f64,
    pub total_gross_wage: f64,
    pub net_ni_wage: f64,
    pub net_cash_wage: f64,
    pub total_net_wage: f64,
    /// Non-fatal review flags (e.g. negative NI-side net wage)
    pub warnings: Vec<String>,
}
