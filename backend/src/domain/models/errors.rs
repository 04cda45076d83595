//! Error taxonomy for the wage computation engine.
//!
//! All variants are fatal for the employee whose breakdown is being
//! computed, and only for that employee: within a pay run recompute, a
//! failed employee is reported alongside the successful breakdowns. A
//! negative net wage is deliberately NOT an error; it is surfaced as a
//! warning on the produced breakdown.

#[derive(Debug, thiserror::Error)]
pub enum WageComputeError {
    /// Mutually-exclusive mode violation or otherwise unusable pay
    /// structure; raised before any arithmetic starts
    #[error("Invalid pay structure configuration: {0}")]
    Configuration(String),

    /// Negative hours/days or other unusable source data
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Illegal pay run lifecycle transition or recompute outside Draft
    #[error("Cannot {action} a pay run in {from} state")]
    InvalidState { from: String, action: String },

    /// Internal reconciliation failure: allocations do not sum back to the
    /// parent total. Should never surface from a correct computation.
    #[error("Allocation imbalance on {field}: expected {expected}, got {actual}")]
    AllocationImbalance {
        field: String,
        expected: f64,
        actual: f64,
    },
}
