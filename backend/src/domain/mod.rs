//! # Domain Module
//!
//! Contains all business logic for the payroll wage computation engine.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how wages are computed, composed, and prorated across
//! timesheets. It operates independently of any specific UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **pay_structure_resolver**: Validation and canonicalization of pay structure configuration
//! - **pay_structure_service**: The write path for employee pay structures
//! - **daily_wage_calculator**: NI-side and cash-side wages from attendance days
//! - **hourly_wage_calculator**: NI-side and cash-side wages from worked hours
//! - **other_considerations_applier**: Named additions/deductions and per-entry cash adjustments
//! - **nic_tax_aggregator**: Employer/employee NIC and employee tax totals for a period
//! - **wage_composer**: Gross and net wage composition across both sides
//! - **timesheet_allocator**: Proration of the composed wage back across contributing timesheets
//! - **pay_run_service**: Per-employee orchestration, pay run lifecycle, and Draft recompute
//! - **timesheet_service** / **nic_tax_service**: The write path for source records
//!
//! ## Core Concepts
//!
//! - **NI-side / cash-side**: the two parallel wage ledgers; NI-side wages are
//!   subject to NI contributions and income tax, cash-side wages are not
//! - **Pay run**: a batch of wage computations over a fixed date range, with
//!   lifecycle Draft/Approved/Paid
//! - **Allocation**: proration of a combined wage back across the individual
//!   timesheets (often different locations) for cost-center reporting
//!
//! ## Business Rules
//!
//! - Daily and hourly rates are mutually exclusive per pay structure
//! - Negative attendance figures are rejected, never silently dropped
//! - A Draft pay run is freely recomputable and recompute is idempotent
//! - Allocations over all contributing timesheets sum back to the unsplit totals
//! - One employee's failure never aborts sibling computations in the same run

pub mod commands;
pub mod daily_wage_calculator;
pub mod hourly_wage_calculator;
pub mod models;
pub mod nic_tax_aggregator;
pub mod nic_tax_service;
pub mod other_considerations_applier;
pub mod pay_run_service;
pub mod pay_structure_resolver;
pub mod pay_structure_service;
pub mod timesheet_allocator;
pub mod timesheet_service;
pub mod wage_composer;

pub use daily_wage_calculator::*;
pub use hourly_wage_calculator::*;
pub use nic_tax_aggregator::*;
pub use nic_tax_service::*;
pub use other_considerations_applier::*;
pub use pay_run_service::*;
pub use pay_structure_resolver::*;
pub use pay_structure_service::*;
pub use timesheet_allocator::*;
pub use timesheet_service::*;
pub use wage_composer::*;
