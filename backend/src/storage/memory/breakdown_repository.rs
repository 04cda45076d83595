//! In-memory wage breakdown repository, grouped by scope (pay run id).
//!
//! The whole group for a scope is replaced in one locked write, so readers
//! never observe a mix of breakdowns from two different recomputes.

use anyhow::Result;

use super::connection::MemoryConnection;
use crate::storage::traits::BreakdownStorage;
use shared::WageBreakdown;

#[derive(Clone)]
pub struct BreakdownRepository {
    connection: MemoryConnection,
}

impl BreakdownRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl BreakdownStorage for BreakdownRepository {
    fn replace_breakdowns(&self, scope: &str, breakdowns: &[WageBreakdown]) -> Result<()> {
        let mut sorted = breakdowns.to_vec();
        sorted.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        let mut store = self.connection.store()?;
        store.breakdowns.insert(scope.to_string(), sorted);
        Ok(())
    }

    fn list_breakdowns(&self, scope: &str) -> Result<Vec<WageBreakdown>> {
        let store = self.connection.store()?;
        Ok(store.breakdowns.get(scope).cloned().unwrap_or_default())
    }

    fn get_breakdown(&self, breakdown_id: &str) -> Result<Option<WageBreakdown>> {
        let store = self.connection.store()?;
        Ok(store
            .breakdowns
            .values()
            .flatten()
            .find(|breakdown| breakdown.id == breakdown_id)
            .cloned())
    }
}
