//! In-memory NIC/Tax entry repository, keyed by (record_id, employee_id).

use anyhow::Result;

use super::connection::MemoryConnection;
use crate::storage::traits::NicTaxStorage;
use shared::NicTaxEntry;

#[derive(Clone)]
pub struct NicTaxRepository {
    connection: MemoryConnection,
}

impl NicTaxRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

fn overlaps(entry_start: &str, entry_end: &str, period_start: &str, period_end: &str) -> bool {
    entry_start <= period_end && period_start <= entry_end
}

impl NicTaxStorage for NicTaxRepository {
    fn store_entry(&self, entry: &NicTaxEntry) -> Result<()> {
        let mut store = self.connection.store()?;
        store.nic_tax_entries.insert(
            (entry.record_id.clone(), entry.employee_id.clone()),
            entry.clone(),
        );
        Ok(())
    }

    fn list_entries_for_period(
        &self,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<NicTaxEntry>> {
        let store = self.connection.store()?;
        Ok(store
            .nic_tax_entries
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
            .nic_tax_entries
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

    fn delete_entry(&self, record_id: &str, employee_id: &str) -> Result<bool> {
        let mut store = self.connection.store()?;
        Ok(store
            .nic_tax_entries
            .remove(&(record_id.to_string(), employee_id.to_string()))
            .is_some())
    }
}
