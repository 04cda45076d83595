//! MemoryConnection owns the shared store and hands out repositories.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::storage::traits::Connection;
use shared::{NicTaxEntry, PayRun, PayStructure, TimesheetEntry, WageBreakdown};

use super::{
    BreakdownRepository, NicTaxRepository, PayRunRepository, PayStructureRepository,
    TimesheetRepository,
};

/// All persisted state, kept in ordered maps so listings are deterministic
#[derive(Default)]
pub(super) struct MemoryStore {
    /// employee_id -> pay structure
    pub pay_structures: BTreeMap<String, PayStructure>,
    /// (timesheet_id, employee_id) -> entry
    pub timesheet_entries: BTreeMap<(String, String), TimesheetEntry>,
    /// (record_id, employee_id) -> entry
    pub nic_tax_entries: BTreeMap<(String, String), NicTaxEntry>,
    /// pay_run_id -> pay run
    pub pay_runs: BTreeMap<String, PayRun>,
    /// scope (pay run id) -> breakdowns ordered by employee_id
    pub breakdowns: BTreeMap<String, Vec<WageBreakdown>>,
}

/// MemoryConnection manages the shared store behind a single mutex
#[derive(Clone)]
pub struct MemoryConnection {
    store: Arc<Mutex<MemoryStore>>,
}

impl MemoryConnection {
    /// Create a new, empty in-memory connection
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(MemoryStore::default())),
        }
    }

    /// Lock the shared store. A poisoned lock means another thread panicked
    /// mid-write; surface that instead of reading possibly-torn state.
    pub(super) fn store(&self) -> Result<MutexGuard<'_, MemoryStore>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MemoryConnection {
    type PayStructureRepository = PayStructureRepository;
    type TimesheetRepository = TimesheetRepository;
    type NicTaxRepository = NicTaxRepository;
    type PayRunRepository = PayRunRepository;
    type BreakdownRepository = BreakdownRepository;

    fn create_pay_structure_repository(&self) -> Self::PayStructureRepository {
        PayStructureRepository::new(self.clone())
    }

    fn create_timesheet_repository(&self) -> Self::TimesheetRepository {
        TimesheetRepository::new(self.clone())
    }

    fn create_nic_tax_repository(&self) -> Self::NicTaxRepository {
        NicTaxRepository::new(self.clone())
    }

    fn create_pay_run_repository(&self) -> Self::PayRunRepository {
        PayRunRepository::new(self.clone())
    }

    fn create_breakdown_repository(&self) -> Self::BreakdownRepository {
        BreakdownRepository::new(self.clone())
    }
}
