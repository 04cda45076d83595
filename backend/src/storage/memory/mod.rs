//! # In-Memory Storage Module
//!
//! This module provides an in-memory storage implementation for the payroll
//! tracker. It demonstrates that the domain logic is completely
//! storage-agnostic: every repository implements the same traits a database
//! or file backend would.
//!
//! ## Features
//!
//! - A single shared [`MemoryStore`] behind one mutex, so a whole-group
//!   breakdown replace is atomic with respect to concurrent readers
//! - Ordered maps throughout, so listings are deterministic
//! - Upsert semantics for keyed records (saving again replaces)

pub mod breakdown_repository;
pub mod connection;
pub mod nic_tax_repository;
pub mod pay_run_repository;
pub mod pay_structure_repository;
pub mod timesheet_repository;

pub use breakdown_repository::BreakdownRepository;
pub use connection::MemoryConnection;
pub use nic_tax_repository::NicTaxRepository;
pub use pay_run_repository::PayRunRepository;
pub use pay_structure_repository::PayStructureRepository;
pub use timesheet_repository::TimesheetRepository;
