//! Domain-level command types
//! These structs are the inputs services accept. Callers (a transport layer,
//! a desktop shell, tests) build them from the public DTOs defined in the
//! `shared` crate.

pub mod pay_runs {
    /// Input for creating a new pay run.
    #[derive(Debug, Clone)]
    pub struct CreatePayRunCommand {
        pub name: String,
        pub period_start: String,
        pub period_end: String,
    }

    /// Input for computing a single employee's breakdown over a period,
    /// outside any pay run.
    #[derive(Debug, Clone)]
    pub struct ComputeBreakdownCommand {
        pub employee_id: String,
        pub period_start: String,
        pub period_end: String,
    }
}
