//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use shared::{NicTaxEntry, PayRun, PayStructure, TimesheetEntry, WageBreakdown};

/// Trait defining the interface for pay structure storage operations.
///
/// One pay structure per employee; storing again replaces the previous
/// configuration.
pub trait PayStructureStorage: Send + Sync {
    /// Store or replace the pay structure for an employee
    fn store_pay_structure(&self, employee_id: &str, structure: &PayStructure) -> Result<()>;

    /// Retrieve the pay structure for an employee
    fn get_pay_structure(&self, employee_id: &str) -> Result<Option<PayStructure>>;

    /// List all configured (employee_id, structure) pairs ordered by employee_id
    fn list_pay_structures(&self) -> Result<Vec<(String, PayStructure)>>;

    /// Delete the pay structure for an employee
    /// Returns true if a structure was found and deleted, false otherwise
    fn delete_pay_structure(&self, employee_id: &str) -> Result<bool>;
}

/// Trait defining the interface for timesheet entry storage operations.
///
/// Entries are keyed by (timesheet_id, employee_id); storing an entry with
/// an existing key replaces it.
pub trait TimesheetStorage: Send + Sync {
    /// Store or replace a timesheet entry
    fn store_entry(&self, entry: &TimesheetEntry) -> Result<()>;

    /// List one employee's entries whose timesheet period overlaps the given
    /// period (bounds inclusive), ordered by timesheet_id
    fn list_entries_for_period(
        &self,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<TimesheetEntry>>;

    /// List the distinct employee IDs with at least one entry overlapping
    /// the given period, ordered ascending
    fn list_employees_in_period(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<String>>;

    /// Delete a single entry
    /// Returns true if the entry was found and deleted, false otherwise
    fn delete_entry(&self, timesheet_id: &str, employee_id: &str) -> Result<bool>;
}

/// Trait defining the interface for NIC/Tax entry storage operations.
///
/// Entries are keyed by (record_id, employee_id); storing an entry with an
/// existing key replaces it.
pub trait NicTaxStorage: Send + Sync {
    /// Store or replace a NIC/Tax entry
    fn store_entry(&self, entry: &NicTaxEntry) -> Result<()>;

    /// List one employee's entries whose record period overlaps the given
    /// period (bounds inclusive), ordered by record_id
    fn list_entries_for_period(
        &self,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<NicTaxEntry>>;

    /// List the distinct employee IDs with at least one entry overlapping
    /// the given period, ordered ascending
    fn list_employees_in_period(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<String>>;

    /// Delete a single entry
    /// Returns true if the entry was found and deleted, false otherwise
    fn delete_entry(&self, record_id: &str, employee_id: &str) -> Result<bool>;
}

/// Trait defining the interface for pay run storage operations
pub trait PayRunStorage: Send + Sync {
    /// Store a new pay run
    fn store_pay_run(&self, pay_run: &PayRun) -> Result<()>;

    /// Retrieve a specific pay run by ID
    fn get_pay_run(&self, pay_run_id: &str) -> Result<Option<PayRun>>;

    /// List all pay runs ordered by ID ascending (IDs embed creation time)
    fn list_pay_runs(&self) -> Result<Vec<PayRun>>;

    /// Update an existing pay run
    fn update_pay_run(&self, pay_run: &PayRun) -> Result<()>;
}

/// Trait defining the interface for wage breakdown storage operations.
///
/// Breakdowns are grouped by scope (a pay run ID); a recompute replaces the
/// whole group atomically so a failed run never leaves a half-written mix
/// of old and new breakdowns.
pub trait BreakdownStorage: Send + Sync {
    /// Replace every breakdown stored under the given scope
    fn replace_breakdowns(&self, scope: &str, breakdowns: &[WageBreakdown]) -> Result<()>;

    /// List the breakdowns stored under the given scope, ordered by employee_id
    fn list_breakdowns(&self, scope: &str) -> Result<Vec<WageBreakdown>>;

    /// Retrieve a specific breakdown by its ID
    fn get_breakdown(&self, breakdown_id: &str) -> Result<Option<WageBreakdown>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories. This allows the domain layer
/// to work with any storage backend without knowing the implementation
/// details.
pub trait Connection: Send + Sync + Clone {
    type PayStructureRepository: PayStructureStorage;
    type TimesheetRepository: TimesheetStorage;
    type NicTaxRepository: NicTaxStorage;
    type PayRunRepository: PayRunStorage;
    type BreakdownRepository: BreakdownStorage;

    fn create_pay_structure_repository(&self) -> Self::PayStructureRepository;
    fn create_timesheet_repository(&self) -> Self::TimesheetRepository;
    fn create_nic_tax_repository(&self) -> Self::NicTaxRepository;
    fn create_pay_run_repository(&self) -> Self::PayRunRepository;
    fn create_breakdown_repository(&self) -> Self::BreakdownRepository;
}
