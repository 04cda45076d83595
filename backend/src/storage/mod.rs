//! # Storage Module
//!
//! Persistence seam for the wage engine. The domain services only talk to
//! the traits defined in [`traits`]; the in-memory backend in [`memory`] is
//! the reference implementation and the one the test suites run against.

pub mod memory;
pub mod traits;

pub use traits::{
    BreakdownStorage, Connection, NicTaxStorage, PayRunStorage, PayStructureStorage,
    TimesheetStorage,
};
