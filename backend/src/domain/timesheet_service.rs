//! Timesheet entry write path.
//!
//! Saving an entry validates it, rejects edits inside a period frozen by an
//! Approved or Paid pay run, and flags every overlapping Draft run for
//! recalculation so its breakdowns are known to be stale.

use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use crate::domain::models::errors::WageComputeError;
use crate::domain::pay_run_service::PayRunService;
use crate::storage::memory::{MemoryConnection, TimesheetRepository};
use crate::storage::traits::{Connection, TimesheetStorage};
use shared::{PayRun, SaveTimesheetEntryResponse, TimesheetEntry};

/// Service for managing timesheet entries
#[derive(Clone)]
pub struct TimesheetService {
    timesheet_repository: TimesheetRepository,
    pay_run_service: PayRunService,
}

impl TimesheetService {
    /// Create a new TimesheetService
    pub fn new(connection: Arc<MemoryConnection>, pay_run_service: PayRunService) -> Self {
        Self {
            timesheet_repository: connection.create_timesheet_repository(),
            pay_run_service,
        }
    }

    /// Store or replace a timesheet entry and flag overlapping Draft runs
    pub fn save_entry(&self, entry: TimesheetEntry) -> Result<SaveTimesheetEntryResponse> {
        self.validate_entry(&entry)?;
        self.reject_locked_period(&entry.period_start, &entry.period_end, "save")?;

        self.timesheet_repository.store_entry(&entry)?;
        info!(
            "Saved timesheet entry for employee {} on {} ({}..{})",
            entry.employee_id, entry.timesheet_id, entry.period_start, entry.period_end
        );

        let flagged_pay_run_ids = self
            .pay_run_service
            .flag_recalculation_for_period(&entry.period_start, &entry.period_end)?;

        Ok(SaveTimesheetEntryResponse {
            success_message: format!(
                "Timesheet entry saved for employee {}",
                entry.employee_id
            ),
            entry,
            flagged_pay_run_ids,
        })
    }

    /// List one employee's entries overlapping the given period
    pub fn list_entries_for_period(
        &self,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<TimesheetEntry>> {
        self.timesheet_repository
            .list_entries_for_period(employee_id, period_start, period_end)
    }

    /// Delete a timesheet entry and flag overlapping Draft runs.
    /// Returns the flagged pay run IDs; errors if the entry does not exist.
    pub fn delete_entry(&self, timesheet_id: &str, employee_id: &str) -> Result<Vec<String>> {
        let entry = self
            .timesheet_repository
            .list_entries_for_period(employee_id, "0000-01-01", "9999-12-31")?
            .into_iter()
            .find(|e| e.timesheet_id == timesheet_id)
            .ok_or_else(|| {
                anyhow!(
                    "Timesheet entry not found: {} / {}",
                    timesheet_id,
                    employee_id
                )
            })?;
        self.reject_locked_period(&entry.period_start, &entry.period_end, "delete")?;

        self.timesheet_repository
            .delete_entry(timesheet_id, employee_id)?;
        info!(
            "Deleted timesheet entry for employee {} on {}",
            employee_id, timesheet_id
        );

        self.pay_run_service
            .flag_recalculation_for_period(&entry.period_start, &entry.period_end)
    }

    fn validate_entry(&self, entry: &TimesheetEntry) -> Result<()> {
        if entry.timesheet_id.trim().is_empty() {
            return Err(anyhow!("Timesheet ID cannot be empty"));
        }
        if entry.employee_id.trim().is_empty() {
            return Err(anyhow!("Employee ID cannot be empty"));
        }
        if !PayRun::is_valid_period_date(&entry.period_start)
            || !PayRun::is_valid_period_date(&entry.period_end)
        {
            return Err(WageComputeError::InvalidEntry(format!(
                "invalid timesheet period: {}..{}",
                entry.period_start, entry.period_end
            ))
            .into());
        }
        if entry.period_start > entry.period_end {
            return Err(WageComputeError::InvalidEntry(format!(
                "timesheet period start {} is after end {}",
                entry.period_start, entry.period_end
            ))
            .into());
        }

        let non_negative = [
            ("hours worked", entry.hours_worked),
            ("days worked", entry.days_worked),
            ("extra shifts worked", entry.extra_shift_worked),
            ("cash addition", entry.other_cash_addition),
            ("cash deduction", entry.other_cash_deduction),
        ];
        for (label, value) in non_negative {
            if value < 0.0 {
                return Err(WageComputeError::InvalidEntry(format!(
                    "{} cannot be negative: {}",
                    label, value
                ))
                .into());
            }
        }
        Ok(())
    }

    fn reject_locked_period(
        &self,
        period_start: &str,
        period_end: &str,
        action: &str,
    ) -> Result<()> {
        if let Some(locked) = self
            .pay_run_service
            .locked_run_for_period(period_start, period_end)?
        {
            return Err(anyhow!(
                "Cannot {} timesheet entry: period overlaps {} pay run '{}'",
                action,
                locked.status,
                locked.name
            ));
        }
        Ok(())
    }
}
