//! NIC/Tax entry write path.
//!
//! Mirrors the timesheet write path: validation, the Approved/Paid period
//! freeze, and Draft-run flagging all apply to NIC/Tax records too, since a
//! changed withholding figure invalidates computed breakdowns just as a
//! changed attendance figure does.

use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use crate::domain::models::errors::WageComputeError;
use crate::domain::pay_run_service::PayRunService;
use crate::storage::memory::{MemoryConnection, NicTaxRepository};
use crate::storage::traits::{Connection, NicTaxStorage};
use shared::{NicTaxEntry, PayRun, SaveNicTaxEntryResponse};

/// Service for managing NIC/Tax entries
#[derive(Clone)]
pub struct NicTaxService {
    nic_tax_repository: NicTaxRepository,
    pay_run_service: PayRunService,
}

impl NicTaxService {
    /// Create a new NicTaxService
    pub fn new(connection: Arc<MemoryConnection>, pay_run_service: PayRunService) -> Self {
        Self {
            nic_tax_repository: connection.create_nic_tax_repository(),
            pay_run_service,
        }
    }

    /// Store or replace a NIC/Tax entry and flag overlapping Draft runs
    pub fn save_entry(&self, entry: NicTaxEntry) -> Result<SaveNicTaxEntryResponse> {
        self.validate_entry(&entry)?;
        self.reject_locked_period(&entry.period_start, &entry.period_end, "save")?;

        self.nic_tax_repository.store_entry(&entry)?;
        info!(
            "Saved NIC/Tax entry for employee {} on {} ({}..{})",
            entry.employee_id, entry.record_id, entry.period_start, entry.period_end
        );

        let flagged_pay_run_ids = self
            .pay_run_service
            .flag_recalculation_for_period(&entry.period_start, &entry.period_end)?;

        Ok(SaveNicTaxEntryResponse {
            success_message: format!("NIC/Tax entry saved for employee {}", entry.employee_id),
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
    ) -> Result<Vec<NicTaxEntry>> {
        self.nic_tax_repository
            .list_entries_for_period(employee_id, period_start, period_end)
    }

    /// Delete a NIC/Tax entry and flag overlapping Draft runs.
    /// Returns the flagged pay run IDs; errors if the entry does not exist.
    pub fn delete_entry(&self, record_id: &str, employee_id: &str) -> Result<Vec<String>> {
        let entry = self
            .nic_tax_repository
            .list_entries_for_period(employee_id, "0000-01-01", "9999-12-31")?
            .into_iter()
            .find(|e| e.record_id == record_id)
            .ok_or_else(|| {
                anyhow!("NIC/Tax entry not found: {} / {}", record_id, employee_id)
            })?;
        self.reject_locked_period(&entry.period_start, &entry.period_end, "delete")?;

        self.nic_tax_repository.delete_entry(record_id, employee_id)?;
        info!(
            "Deleted NIC/Tax entry for employee {} on {}",
            employee_id, record_id
        );

        self.pay_run_service
            .flag_recalculation_for_period(&entry.period_start, &entry.period_end)
    }

    fn validate_entry(&self, entry: &NicTaxEntry) -> Result<()> {
        if entry.record_id.trim().is_empty() {
            return Err(anyhow!("NIC/Tax record ID cannot be empty"));
        }
        if entry.employee_id.trim().is_empty() {
            return Err(anyhow!("Employee ID cannot be empty"));
        }
        if !PayRun::is_valid_period_date(&entry.period_start)
            || !PayRun::is_valid_period_date(&entry.period_end)
        {
            return Err(WageComputeError::InvalidEntry(format!(
                "invalid NIC/Tax period: {}..{}",
                entry.period_start, entry.period_end
            ))
            .into());
        }
        if entry.period_start > entry.period_end {
            return Err(WageComputeError::InvalidEntry(format!(
                "NIC/Tax period start {} is after end {}",
                entry.period_start, entry.period_end
            ))
            .into());
        }

        // Negative NIC/Tax amounts are legitimate: HMRC corrections and
        // refunds arrive as negative figures
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
                "Cannot {} NIC/Tax entry: period overlaps {} pay run '{}'",
                action,
                locked.status,
                locked.name
            ));
        }
        Ok(())
    }
}
