//! NIC and tax aggregation.
//!
//! Folds employer/employee NIC and employee tax entries for one employee
//! over the pay run period. Employer NIC is informational (cost reporting)
//! and never touches the employee's net pay; employee NIC and tax are
//! withheld from the NI-side wage only.

use crate::domain::models::wage::NicTaxTotals;
use shared::NicTaxEntry;

/// Service that totals NIC/Tax entries for one employee over a period
#[derive(Clone, Default)]
pub struct NicTaxAggregator;

impl NicTaxAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, entries: &[NicTaxEntry]) -> NicTaxTotals {
        let mut totals = NicTaxTotals::default();
        for entry in entries {
            totals.er_nic += entry.er_nic;
            totals.ees_nic += entry.ees_nic;
            totals.ees_tax += entry.ees_tax;
        }
        totals
    }
}
