//! In-memory pay structure repository, one structure per employee.

use anyhow::Result;

use super::connection::MemoryConnection;
use crate::storage::traits::PayStructureStorage;
use shared::PayStructure;

#[derive(Clone)]
pub struct PayStructureRepository {
    connection: MemoryConnection,
}

impl PayStructureRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl PayStructureStorage for PayStructureRepository {
    fn store_pay_structure(&self, employee_id: &str, structure: &PayStructure) -> Result<()> {
        let mut store = self.connection.store()?;
        store
            .pay_structures
            .insert(employee_id.to_string(), structure.clone());
        Ok(())
    }

    fn get_pay_structure(&self, employee_id: &str) -> Result<Option<PayStructure>> {
        let store = self.connection.store()?;
        Ok(store.pay_structures.get(employee_id).cloned())
    }

    fn list_pay_structures(&self) -> Result<Vec<(String, PayStructure)>> {
        let store = self.connection.store()?;
        Ok(store
            .pay_structures
            .iter()
            .map(|(id, structure)| (id.clone(), structure.clone()))
            .collect())
    }

    fn delete_pay_structure(&self, employee_id: &str) -> Result<bool> {
        let mut store = self.connection.store()?;
        Ok(store.pay_structures.remove(employee_id).is_some())
    }
}
