//! Cross-timesheet wage allocation.
//!
//! When an employee's period hours/days come from more than one timesheet
//! (e.g. split across two locations), the composed wage and employer NIC
//! are prorated back across the contributing timesheets for cost-center
//! reporting. The timesheet set is treated as an immutable snapshot for the
//! duration of one computation, and allocation rows reference their source
//! timesheet by id only.

use crate::domain::models::errors::WageComputeError;
use crate::domain::models::wage::{ComposedWage, DailyWageResult, HourlyWageResult, NicTaxTotals};
use shared::{TimesheetAllocation, TimesheetEntry};

/// Reconciliation tolerance, applied before any presentation rounding
const BALANCE_TOLERANCE: f64 = 1e-6;

/// Service that prorates a composed wage across contributing timesheets
#[derive(Clone, Default)]
pub struct TimesheetAllocator;

impl TimesheetAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Prorate the composed wage across the contributing timesheets.
    ///
    /// Returns no rows when fewer than two timesheets contributed: a
    /// single-source breakdown is already fully attributed. Every ratio
    /// with a zero denominator is defined as 0, never NaN.
    pub fn allocate(
        &self,
        entries: &[TimesheetEntry],
        daily: &DailyWageResult,
        hourly: &HourlyWageResult,
        composed: &ComposedWage,
        nic_tax: &NicTaxTotals,
    ) -> Result<Vec<TimesheetAllocation>, WageComputeError> {
        if entries.len() < 2 {
            return Ok(Vec::new());
        }

        let total_hours: f64 = entries.iter().map(|e| e.hours_worked).sum();
        let total_days: f64 = entries.iter().map(|e| e.days_worked).sum();
        let total_extra_shifts: f64 = entries.iter().map(|e| e.extra_shift_worked).sum();

        let gross_hours_wage = hourly.gross_hours_wage();
        let gross_days_wage = daily.gross_days_wage();
        let extra_shift_wage = daily.extra_shift_wage();

        // The wage ratio weights each timesheet by the wage it actually
        // earned, not by raw hours: a timesheet contributing mostly days
        // still gets its fair share of the NI/cash split.
        let wage_basis = gross_hours_wage + gross_days_wage + extra_shift_wage;

        let mut allocations = Vec::with_capacity(entries.len());
        for entry in entries {
            let hours_ratio = ratio(entry.hours_worked, total_hours);
            let days_ratio = ratio(entry.days_worked, total_days);
            let extra_shift_ratio = ratio(entry.extra_shift_worked, total_extra_shifts);

            let alloc_hours_wage = hours_ratio * gross_hours_wage;
            let alloc_days_wage = days_ratio * gross_days_wage;
            let alloc_extra_shift_wage = extra_shift_ratio * extra_shift_wage;

            let contribution = alloc_hours_wage + alloc_days_wage + alloc_extra_shift_wage;
            let wage_ratio = ratio(contribution, wage_basis);

            let alloc_gross_ni_wage = wage_ratio * composed.gross_ni_wage;
            let alloc_gross_cash_wage = wage_ratio * composed.gross_cash_wage;
            let alloc_eer_nic = wage_ratio * nic_tax.er_nic;

            allocations.push(TimesheetAllocation {
                timesheet_id: entry.timesheet_id.clone(),
                timesheet_name: entry.timesheet_name.clone(),
                location: entry.location.clone(),
                hours_ratio,
                days_ratio,
                extra_shift_ratio,
                alloc_hours_wage,
                alloc_days_wage,
                alloc_extra_shift_wage,
                wage_ratio,
                alloc_gross_ni_wage,
                alloc_gross_cash_wage,
                alloc_eer_nic,
                alloc_wage_cost: alloc_gross_ni_wage + alloc_gross_cash_wage + alloc_eer_nic,
            });
        }

        self.reconcile(&allocations, total_hours, total_days, total_extra_shifts, wage_basis, daily, hourly, composed, nic_tax)?;

        Ok(allocations)
    }

    /// Internal consistency check: allocations over all contributing
    /// timesheets must sum back to the unsplit totals. An amount with no
    /// attributable units (zero denominator) stays on the parent breakdown
    /// and is exempt.
    #[allow(clippy::too_many_arguments)]
    fn reconcile(
        &self,
        allocations: &[TimesheetAllocation],
        total_hours: f64,
        total_days: f64,
        total_extra_shifts: f64,
        wage_basis: f64,
        daily: &DailyWageResult,
        hourly: &HourlyWageResult,
        composed: &ComposedWage,
        nic_tax: &NicTaxTotals,
    ) -> Result<(), WageComputeError> {
        let checks: [(&str, f64, f64, f64); 6] = [
            (
                "F4_allocHoursWage",
                total_hours,
                hourly.gross_hours_wage(),
                allocations.iter().map(|a| a.alloc_hours_wage).sum(),
            ),
            (
                "F5_allocDaysWage",
                total_days,
                daily.gross_days_wage(),
                allocations.iter().map(|a| a.alloc_days_wage).sum(),
            ),
            (
                "F6_allocExtraShiftWage",
                total_extra_shifts,
                daily.extra_shift_wage(),
                allocations.iter().map(|a| a.alloc_extra_shift_wage).sum(),
            ),
            (
                "F8_allocGrossNIWage",
                wage_basis,
                composed.gross_ni_wage,
                allocations.iter().map(|a| a.alloc_gross_ni_wage).sum(),
            ),
            (
                "F9_allocGrossCashWage",
                wage_basis,
                composed.gross_cash_wage,
                allocations.iter().map(|a| a.alloc_gross_cash_wage).sum(),
            ),
            (
                "F10_allocEerNIC",
                wage_basis,
                nic_tax.er_nic,
                allocations.iter().map(|a| a.alloc_eer_nic).sum(),
            ),
        ];

        for (field, denominator, expected, actual) in checks {
            if denominator == 0.0 {
                continue;
            }
            if (expected - actual).abs() > BALANCE_TOLERANCE {
                return Err(WageComputeError::AllocationImbalance {
                    field: field.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// A proportion with a zero denominator is 0, never NaN
fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}
