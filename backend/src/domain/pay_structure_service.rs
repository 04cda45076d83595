//! Pay structure configuration service.
//!
//! The write path for employee pay structures. A structure is validated
//! through the resolver before it is stored, so every structure the
//! computation pipeline later reads is known to be resolvable; the raw
//! (un-canonicalized) form is what gets persisted, keeping stray values
//! visible to whoever edits the configuration next.

use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use crate::domain::pay_structure_resolver::PayStructureResolver;
use crate::storage::memory::{MemoryConnection, PayStructureRepository};
use crate::storage::traits::{Connection, PayStructureStorage};
use shared::PayStructure;

/// Service for managing employee pay structures
#[derive(Clone)]
pub struct PayStructureService {
    pay_structure_repository: PayStructureRepository,
    resolver: PayStructureResolver,
}

impl PayStructureService {
    /// Create a new PayStructureService
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            pay_structure_repository: connection.create_pay_structure_repository(),
            resolver: PayStructureResolver::new(),
        }
    }

    /// Store or replace an employee's pay structure.
    ///
    /// The structure must pass resolution; the stored form is the one the
    /// caller supplied.
    pub fn save_pay_structure(
        &self,
        employee_id: &str,
        structure: PayStructure,
    ) -> Result<PayStructure> {
        if employee_id.trim().is_empty() {
            return Err(anyhow!("Employee ID cannot be empty"));
        }
        if structure.pay_structure_name.trim().is_empty() {
            return Err(anyhow!("Pay structure name cannot be empty"));
        }

        self.resolver.resolve(&structure)?;

        self.pay_structure_repository
            .store_pay_structure(employee_id, &structure)?;
        info!(
            "Saved pay structure '{}' for employee: {}",
            structure.pay_structure_name, employee_id
        );

        Ok(structure)
    }

    /// Get an employee's pay structure, if one is configured
    pub fn get_pay_structure(&self, employee_id: &str) -> Result<Option<PayStructure>> {
        self.pay_structure_repository.get_pay_structure(employee_id)
    }

    /// List all configured (employee_id, structure) pairs
    pub fn list_pay_structures(&self) -> Result<Vec<(String, PayStructure)>> {
        self.pay_structure_repository.list_pay_structures()
    }

    /// Delete an employee's pay structure.
    /// Returns true if a structure was found and deleted.
    pub fn delete_pay_structure(&self, employee_id: &str) -> Result<bool> {
        let deleted = self
            .pay_structure_repository
            .delete_pay_structure(employee_id)?;
        if deleted {
            info!("Deleted pay structure for employee: {}", employee_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DailyRatesConfig, HourlyRatesConfig, NiDayMode, NiHoursMode};

    fn setup_test() -> PayStructureService {
        PayStructureService::new(Arc::new(MemoryConnection::new()))
    }

    fn daily_structure() -> PayStructure {
        PayStructure {
            pay_structure_name: "Daily staff".to_string(),
            has_daily_rates: true,
            daily_rates: DailyRatesConfig {
                ni_day_mode: NiDayMode::All,
                ni_regular_days: 20.0,
                ni_regular_day_rate: 18.5,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let service = setup_test();

        let saved = service
            .save_pay_structure("emp-1", daily_structure())
            .expect("Failed to save pay structure");
        assert_eq!(saved.pay_structure_name, "Daily staff");

        let loaded = service
            .get_pay_structure("emp-1")
            .expect("Failed to get pay structure")
            .expect("Pay structure should exist");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_save_rejects_unresolvable_structure() {
        let service = setup_test();

        let invalid = PayStructure {
            pay_structure_name: "Broken".to_string(),
            has_daily_rates: true,
            has_hourly_rates: true,
            daily_rates: DailyRatesConfig::default(),
            hourly_rates: HourlyRatesConfig {
                ni_hours_mode: NiHoursMode::All,
                ni_rate_per_hour: 10.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = service.save_pay_structure("emp-1", invalid);
        assert!(result.is_err());
        assert!(service
            .get_pay_structure("emp-1")
            .expect("Failed to get pay structure")
            .is_none());
    }

    #[test]
    fn test_save_rejects_blank_identifiers() {
        let service = setup_test();

        assert!(service.save_pay_structure("  ", daily_structure()).is_err());

        let unnamed = PayStructure {
            pay_structure_name: String::new(),
            ..daily_structure()
        };
        assert!(service.save_pay_structure("emp-1", unnamed).is_err());
    }

    #[test]
    fn test_delete_reports_presence() {
        let service = setup_test();
        service
            .save_pay_structure("emp-1", daily_structure())
            .expect("Failed to save pay structure");

        assert!(service.delete_pay_structure("emp-1").expect("Failed to delete"));
        assert!(!service.delete_pay_structure("emp-1").expect("Failed to delete"));
    }
}
