//! In-memory pay run repository.

use anyhow::{anyhow, Result};

use super::connection::MemoryConnection;
use crate::storage::traits::PayRunStorage;
use shared::PayRun;

#[derive(Clone)]
pub struct PayRunRepository {
    connection: MemoryConnection,
}

impl PayRunRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl PayRunStorage for PayRunRepository {
    fn store_pay_run(&self, pay_run: &PayRun) -> Result<()> {
        let mut store = self.connection.store()?;
        if store.pay_runs.contains_key(&pay_run.id) {
            return Err(anyhow!("Pay run already exists: {}", pay_run.id));
        }
        store.pay_runs.insert(pay_run.id.clone(), pay_run.clone());
        Ok(())
    }

    fn get_pay_run(&self, pay_run_id: &str) -> Result<Option<PayRun>> {
        let store = self.connection.store()?;
        Ok(store.pay_runs.get(pay_run_id).cloned())
    }

    fn list_pay_runs(&self) -> Result<Vec<PayRun>> {
        let store = self.connection.store()?;
        Ok(store.pay_runs.values().cloned().collect())
    }

    fn update_pay_run(&self, pay_run: &PayRun) -> Result<()> {
        let mut store = self.connection.store()?;
        if !store.pay_runs.contains_key(&pay_run.id) {
            return Err(anyhow!("Pay run not found: {}", pay_run.id));
        }
        store.pay_runs.insert(pay_run.id.clone(), pay_run.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PayRunStatus;

    fn pay_run(id_millis: u64) -> PayRun {
        PayRun {
            id: PayRun::generate_id(id_millis),
            name: "January".to_string(),
            period_start: "2025-01-01".to_string(),
            period_end: "2025-01-31".to_string(),
            status: PayRunStatus::Draft,
            needs_recalculation: false,
            created_at: "2025-02-01T00:00:00Z".to_string(),
            updated_at: "2025-02-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_store_rejects_duplicate_id() {
        let repository = PayRunRepository::new(MemoryConnection::new());
        repository.store_pay_run(&pay_run(1000)).expect("Failed to store pay run");

        let result = repository.store_pay_run(&pay_run(1000));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_requires_existing_run() {
        let repository = PayRunRepository::new(MemoryConnection::new());
        assert!(repository.update_pay_run(&pay_run(1000)).is_err());

        repository.store_pay_run(&pay_run(1000)).expect("Failed to store pay run");
        let mut updated = pay_run(1000);
        updated.status = PayRunStatus::Approved;
        repository.update_pay_run(&updated).expect("Failed to update pay run");

        let loaded = repository
            .get_pay_run(&updated.id)
            .expect("Failed to get pay run")
            .expect("Pay run should exist");
        assert_eq!(loaded.status, PayRunStatus::Approved);
    }

    #[test]
    fn test_list_orders_by_id() {
        let repository = PayRunRepository::new(MemoryConnection::new());
        repository.store_pay_run(&pay_run(2000)).expect("Failed to store pay run");
        repository.store_pay_run(&pay_run(1000)).expect("Failed to store pay run");

        let runs = repository.list_pay_runs().expect("Failed to list pay runs");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, "payrun::1000");
        assert_eq!(runs[1].id, "payrun::2000");
    }
}
