//! In-memory timesheet entry repository.
//!
//! Entries are keyed by (timesheet_id, employee_id). Period filtering uses
//! inclusive overlap; ISO dates compare correctly as strings.

use anyhow::Result;

use super::connection::MemoryConnection;
use crate::storage::traits::TimesheetStorage;
use shared::TimesheetEntry;

#[derive(Clone)]
pub struct TimesheetRepository {
    connection: MemoryConnection,
}

impl TimesheetRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

fn overlaps(entry_start: &str, entry_end: &str, period_start: &str, period_end: &str) -> bool {
    entry_start <= period_end && period_start <= entry_end
}

impl TimesheetStorage for TimesheetRepository {
    fn store_entry(&self, entry: &TimesheetEntry) -> Result<()> {
        let mut store = self.connection.store()?;
        store.timesheet_entries.insert(
            (entry.timesheet_id.clone(), entry.employee_id.clone()),
            entry.clone(),
        );
        Ok(())
    }

    fn list_entries_for_period(
        &self,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<TimesheetEntry>> {
        let store = self.connection.store()?;
        Ok(store
            .timesheet_entries
            .values()
            .filter(|entry| {
                entry.employee_id == employee_id
                    && overlaps(&entry.period_start, &entry.period_end, period_start, period_end)
            })
            .cloned()
            .collect())
    }

    fn list_employees_in_period(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<String>> {
        let store = self.connection.store()?;
        let mut employee_ids: Vec<String> = store
            .timesheet_entries
            .values()
            .filter(|entry| {
                overlaps(&entry.period_start, &entry.period_end, period_start, period_end)
            })
            .map(|entry| entry.employee_id.clone())
            .collect();
        employee_ids.sort();
        employee_ids.dedup();
        Ok(employee_ids)
    }

    fn delete_entry(&self, timesheet_id: &str, employee_id: &str) -> Result<bool> {
        let mut store = self.connection.store()?;
        Ok(store
            .timesheet_entries
            .remove(&(timesheet_id.to_string(), employee_id.to_string()))
            .is_some())
    }
}
