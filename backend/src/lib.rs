//! # Payroll Tracker Backend
//!
//! The wage computation and cross-timesheet allocation engine. The backend
//! takes an employee's pay structure configuration together with every
//! timesheet entry and NIC/Tax entry falling inside a pay run period, and
//! derives a single, auditable wage breakdown per employee per pay run.
//!
//! The engine is pure computation: persistence, HTTP transport, report
//! rendering and authentication are external collaborators that call into
//! it through the services wired up by [`Backend`].

use anyhow::Result;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::memory::MemoryConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub pay_structure_service: domain::PayStructureService,
    pub timesheet_service: domain::TimesheetService,
    pub nic_tax_service: domain::NicTaxService,
    pub pay_run_service: domain::PayRunService,
}

impl Backend {
    /// Create a new backend instance with all services over a single
    /// in-memory connection
    pub fn new() -> Result<Self> {
        let connection = Arc::new(MemoryConnection::new());

        let pay_structure_service = domain::PayStructureService::new(connection.clone());
        let pay_run_service = domain::PayRunService::new(connection.clone());
        let timesheet_service =
            domain::TimesheetService::new(connection.clone(), pay_run_service.clone());
        let nic_tax_service = domain::NicTaxService::new(connection, pay_run_service.clone());

        Ok(Backend {
            pay_structure_service,
            timesheet_service,
            nic_tax_service,
            pay_run_service,
        })
    }
}
