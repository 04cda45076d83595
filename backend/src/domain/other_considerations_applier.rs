//! Application of named additions/deductions and per-entry cash adjustments.
//!
//! Pay structures can carry four named lists (NI/cash additions and
//! deductions); timesheet entries can carry ad-hoc cash adjustments. This
//! applier folds all of them into signed per-side adjustments. Negative
//! resulting gross is permitted and surfaced, not clamped; downstream
//! reporting decides how to treat it.

use crate::domain::models::wage::ConsiderationTotals;
use shared::{ConsiderationItem, OtherConsiderations, TimesheetEntry};

/// Service that totals wage adjustments outside the day/hour calculators
#[derive(Clone, Default)]
pub struct OtherConsiderationsApplier;

impl OtherConsiderationsApplier {
    pub fn new() -> Self {
        Self
    }

    /// Fold the structure's named lists (when enabled) and every
    /// contributing entry's cash adjustments into per-side totals
    pub fn apply(
        &self,
        considerations: &OtherConsiderations,
        enabled: bool,
        entries: &[TimesheetEntry],
    ) -> ConsiderationTotals {
        let (ni_additions, ni_deductions, cash_additions, cash_deductions) = if enabled {
            (
                Self::sum_items(&considerations.ni_additions),
                Self::sum_items(&considerations.ni_deductions),
                Self::sum_items(&considerations.cash_additions),
                Self::sum_items(&considerations.cash_deductions),
            )
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };

        let entry_additions: f64 = entries.iter().map(|e| e.other_cash_addition).sum();
        let entry_deductions: f64 = entries.iter().map(|e| e.other_cash_deduction).sum();

        ConsiderationTotals {
            ni_adjustment: ni_additions - ni_deductions,
            cash_adjustment: cash_additions - cash_deductions + entry_additions - entry_deductions,
            total_additions: ni_additions + cash_additions + entry_additions,
            total_deductions: ni_deductions + cash_deductions + entry_deductions,
        }
    }

    fn sum_items(items: &[ConsiderationItem]) -> f64 {
        items.iter().map(|item| item.amount).sum()
    }
}
