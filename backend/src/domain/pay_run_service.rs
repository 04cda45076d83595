//! Pay run lifecycle and breakdown orchestration.
//!
//! A pay run batches one wage computation per eligible employee over a fixed
//! date range. Runs move through Draft -> Approved -> Paid; only a Draft run
//! may be recomputed, and a recompute with unchanged inputs reproduces
//! byte-identical breakdowns. Recomputes of the same run are serialized so
//! two overlapping recomputes cannot interleave their group writes.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::commands::pay_runs::{ComputeBreakdownCommand, CreatePayRunCommand};
use crate::domain::daily_wage_calculator::DailyWageCalculator;
use crate::domain::hourly_wage_calculator::HourlyWageCalculator;
use crate::domain::models::errors::WageComputeError;
use crate::domain::nic_tax_aggregator::NicTaxAggregator;
use crate::domain::other_considerations_applier::OtherConsiderationsApplier;
use crate::domain::pay_structure_resolver::PayStructureResolver;
use crate::domain::timesheet_allocator::TimesheetAllocator;
use crate::domain::wage_composer::GrossNetWageComposer;
use crate::storage::memory::{
    BreakdownRepository, MemoryConnection, NicTaxRepository, PayRunRepository,
    PayStructureRepository, TimesheetRepository,
};
use crate::storage::traits::{
    BreakdownStorage, Connection, NicTaxStorage, PayRunStorage, PayStructureStorage,
    TimesheetStorage,
};
use shared::{
    EmployeeComputeFailure, PayRun, PayRunResponse, PayRunStatus, RecomputePayRunResponse,
    WageBreakdown,
};

/// Service for pay run lifecycle and per-employee wage computation
#[derive(Clone)]
pub struct PayRunService {
    pay_run_repository: PayRunRepository,
    breakdown_repository: BreakdownRepository,
    timesheet_repository: TimesheetRepository,
    nic_tax_repository: NicTaxRepository,
    pay_structure_repository: PayStructureRepository,
    resolver: PayStructureResolver,
    daily_calculator: DailyWageCalculator,
    hourly_calculator: HourlyWageCalculator,
    considerations_applier: OtherConsiderationsApplier,
    nic_tax_aggregator: NicTaxAggregator,
    composer: GrossNetWageComposer,
    allocator: TimesheetAllocator,
    /// One lock per pay run id, taken for the duration of a recompute
    recompute_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl PayRunService {
    /// Create a new PayRunService
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            pay_run_repository: connection.create_pay_run_repository(),
            breakdown_repository: connection.create_breakdown_repository(),
            timesheet_repository: connection.create_timesheet_repository(),
            nic_tax_repository: connection.create_nic_tax_repository(),
            pay_structure_repository: connection.create_pay_structure_repository(),
            resolver: PayStructureResolver::new(),
            daily_calculator: DailyWageCalculator::new(),
            hourly_calculator: HourlyWageCalculator::new(),
            considerations_applier: OtherConsiderationsApplier::new(),
            nic_tax_aggregator: NicTaxAggregator::new(),
            composer: GrossNetWageComposer::new(),
            allocator: TimesheetAllocator::new(),
            recompute_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a new pay run in Draft state
    pub fn create_pay_run(&self, command: CreatePayRunCommand) -> Result<PayRunResponse> {
        if command.name.trim().is_empty() {
            return Err(anyhow!("Pay run name cannot be empty"));
        }
        Self::validate_period(&command.period_start, &command.period_end)?;

        let now = Utc::now();
        let pay_run = PayRun {
            id: PayRun::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            period_start: command.period_start,
            period_end: command.period_end,
            status: PayRunStatus::Draft,
            needs_recalculation: false,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        };

        self.pay_run_repository.store_pay_run(&pay_run)?;
        info!(
            "Created pay run '{}' ({}) for {}..{}",
            pay_run.name, pay_run.id, pay_run.period_start, pay_run.period_end
        );

        Ok(PayRunResponse {
            success_message: format!("Pay run '{}' created", pay_run.name),
            pay_run,
        })
    }

    /// Get a pay run by ID
    pub fn get_pay_run(&self, pay_run_id: &str) -> Result<PayRun> {
        self.pay_run_repository
            .get_pay_run(pay_run_id)?
            .ok_or_else(|| anyhow!("Pay run not found: {}", pay_run_id))
    }

    /// List all pay runs
    pub fn list_pay_runs(&self) -> Result<Vec<PayRun>> {
        self.pay_run_repository.list_pay_runs()
    }

    /// List the breakdowns last computed for a pay run
    pub fn list_breakdowns(&self, pay_run_id: &str) -> Result<Vec<WageBreakdown>> {
        // Existence check first so an unknown run errors instead of
        // returning an empty list
        let pay_run = self.get_pay_run(pay_run_id)?;
        self.breakdown_repository.list_breakdowns(&pay_run.id)
    }

    /// Compute one employee's breakdown over an ad-hoc period, without
    /// persisting anything
    pub fn compute_breakdown(&self, command: ComputeBreakdownCommand) -> Result<WageBreakdown> {
        if command.employee_id.trim().is_empty() {
            return Err(anyhow!("Employee ID cannot be empty"));
        }
        Self::validate_period(&command.period_start, &command.period_end)?;

        let scope = format!("period::{}::{}", command.period_start, command.period_end);
        self.compute_for_scope(
            &scope,
            &command.employee_id,
            &command.period_start,
            &command.period_end,
        )
    }

    /// Recompute every eligible employee's breakdown in a Draft pay run.
    ///
    /// Eligible means having at least one timesheet or NIC/Tax entry
    /// overlapping the run period. One employee's failure never aborts the
    /// others; failures are reported alongside the successful breakdowns.
    /// The stored breakdown group is replaced as a whole and the
    /// needs_recalculation flag is cleared.
    pub fn recompute_pay_run(&self, pay_run_id: &str) -> Result<RecomputePayRunResponse> {
        let run_lock = self.recompute_lock_for(pay_run_id)?;
        let _guard = run_lock
            .lock()
            .map_err(|_| anyhow!("recompute lock poisoned for {}", pay_run_id))?;

        let mut pay_run = self.get_pay_run(pay_run_id)?;
        if pay_run.status != PayRunStatus::Draft {
            return Err(WageComputeError::InvalidState {
                from: pay_run.status.to_string(),
                action: "recompute".to_string(),
            }
            .into());
        }

        let employee_ids = self.eligible_employees(&pay_run)?;
        info!(
            "Recomputing pay run {} for {} employee(s)",
            pay_run.id,
            employee_ids.len()
        );

        let mut breakdowns = Vec::new();
        let mut failures = Vec::new();
        for employee_id in &employee_ids {
            match self.compute_for_scope(
                &pay_run.id,
                employee_id,
                &pay_run.period_start,
                &pay_run.period_end,
            ) {
                Ok(breakdown) => breakdowns.push(breakdown),
                Err(e) => {
                    warn!(
                        "Breakdown failed for employee {} in {}: {}",
                        employee_id, pay_run.id, e
                    );
                    failures.push(EmployeeComputeFailure {
                        employee_id: employee_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.breakdown_repository
            .replace_breakdowns(&pay_run.id, &breakdowns)?;

        pay_run.needs_recalculation = false;
        pay_run.updated_at = Utc::now().to_rfc3339();
        self.pay_run_repository.update_pay_run(&pay_run)?;

        let success_message = if failures.is_empty() {
            format!(
                "Recomputed {} breakdown(s) for pay run '{}'",
                breakdowns.len(),
                pay_run.name
            )
        } else {
            format!(
                "Recomputed {} breakdown(s) for pay run '{}', {} employee(s) failed",
                breakdowns.len(),
                pay_run.name,
                failures.len()
            )
        };

        Ok(RecomputePayRunResponse {
            pay_run,
            breakdowns,
            failures,
            success_message,
        })
    }

    /// Approve a Draft pay run, locking its period against source edits
    pub fn approve_pay_run(&self, pay_run_id: &str) -> Result<PayRunResponse> {
        self.transition(pay_run_id, PayRunStatus::Draft, PayRunStatus::Approved, "approve")
    }

    /// Revert an Approved pay run to Draft for corrections
    pub fn revert_pay_run_to_draft(&self, pay_run_id: &str) -> Result<PayRunResponse> {
        self.transition(
            pay_run_id,
            PayRunStatus::Approved,
            PayRunStatus::Draft,
            "revert to draft",
        )
    }

    /// Mark an Approved pay run as Paid. Paid is terminal.
    pub fn mark_pay_run_paid(&self, pay_run_id: &str) -> Result<PayRunResponse> {
        self.transition(pay_run_id, PayRunStatus::Approved, PayRunStatus::Paid, "mark paid")
    }

    /// Flag every Draft pay run overlapping the given period for
    /// recalculation. Returns the flagged run IDs.
    pub fn flag_recalculation_for_period(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> Result<Vec<String>> {
        let mut flagged = Vec::new();
        for mut pay_run in self.pay_run_repository.list_pay_runs()? {
            if pay_run.status == PayRunStatus::Draft
                && pay_run.overlaps_period(period_start, period_end)
                && !pay_run.needs_recalculation
            {
                pay_run.needs_recalculation = true;
                pay_run.updated_at = Utc::now().to_rfc3339();
                self.pay_run_repository.update_pay_run(&pay_run)?;
                info!("Flagged pay run {} for recalculation", pay_run.id);
                flagged.push(pay_run.id);
            }
        }
        Ok(flagged)
    }

    /// Find an Approved or Paid pay run overlapping the given period, if
    /// any. Source records inside such a period are frozen.
    pub fn locked_run_for_period(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> Result<Option<PayRun>> {
        Ok(self
            .pay_run_repository
            .list_pay_runs()?
            .into_iter()
            .find(|run| {
                run.status != PayRunStatus::Draft && run.overlaps_period(period_start, period_end)
            }))
    }

    fn transition(
        &self,
        pay_run_id: &str,
        from: PayRunStatus,
        to: PayRunStatus,
        action: &str,
    ) -> Result<PayRunResponse> {
        let mut pay_run = self.get_pay_run(pay_run_id)?;
        if pay_run.status != from {
            return Err(WageComputeError::InvalidState {
                from: pay_run.status.to_string(),
                action: action.to_string(),
            }
            .into());
        }

        pay_run.status = to;
        pay_run.updated_at = Utc::now().to_rfc3339();
        self.pay_run_repository.update_pay_run(&pay_run)?;
        info!("Pay run {} transitioned {} -> {}", pay_run.id, from, to);

        Ok(PayRunResponse {
            success_message: format!("Pay run '{}' is now {}", pay_run.name, to),
            pay_run,
        })
    }

    /// Employees with at least one timesheet or NIC/Tax entry in the period
    fn eligible_employees(&self, pay_run: &PayRun) -> Result<Vec<String>> {
        let mut employee_ids = self
            .timesheet_repository
            .list_employees_in_period(&pay_run.period_start, &pay_run.period_end)?;
        employee_ids.extend(
            self.nic_tax_repository
                .list_employees_in_period(&pay_run.period_start, &pay_run.period_end)?,
        );
        employee_ids.sort();
        employee_ids.dedup();
        Ok(employee_ids)
    }

    /// The full computation pipeline for one employee over one period.
    ///
    /// Deterministic in its inputs: the breakdown id derives from scope and
    /// employee, entries arrive in stored order, and no timestamps are
    /// recorded, so recomputing with unchanged inputs reproduces an
    /// identical breakdown.
    fn compute_for_scope(
        &self,
        scope: &str,
        employee_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<WageBreakdown> {
        let structure = self
            .pay_structure_repository
            .get_pay_structure(employee_id)?
            .ok_or_else(|| {
                WageComputeError::Configuration(format!(
                    "no pay structure configured for employee {}",
                    employee_id
                ))
            })?;
        let resolved = self.resolver.resolve(&structure)?;

        let entries = self
            .timesheet_repository
            .list_entries_for_period(employee_id, period_start, period_end)?;
        let nic_entries = self
            .nic_tax_repository
            .list_entries_for_period(employee_id, period_start, period_end)?;

        let total_hours: f64 = entries.iter().map(|e| e.hours_worked).sum();
        let total_days: f64 = entries.iter().map(|e| e.days_worked).sum();
        let total_extra_shifts: f64 = entries.iter().map(|e| e.extra_shift_worked).sum();

        let daily = self
            .daily_calculator
            .calculate(&resolved.daily_rates, total_days, total_extra_shifts)?;
        let hourly = self
            .hourly_calculator
            .calculate(&resolved.hourly_rates, total_hours)?;
        let considerations = self.considerations_applier.apply(
            &resolved.other_considerations,
            resolved.has_other_considerations,
            &entries,
        );
        let nic_tax = self.nic_tax_aggregator.aggregate(&nic_entries);
        let composed = self
            .composer
            .compose(&daily, &hourly, &considerations, &nic_tax);
        let allocations = self
            .allocator
            .allocate(&entries, &daily, &hourly, &composed, &nic_tax)?;

        let mut notes: Vec<String> = entries
            .iter()
            .filter(|e| !e.notes.trim().is_empty())
            .map(|e| e.notes.trim().to_string())
            .collect();
        if resolved.has_other_considerations
            && !resolved.other_considerations.note.trim().is_empty()
        {
            notes.push(resolved.other_considerations.note.trim().to_string());
        }

        let mut breakdown = WageBreakdown::empty(
            WageBreakdown::generate_id(scope, employee_id),
            employee_id.to_string(),
        );
        breakdown.total_hours = total_hours;
        breakdown.total_days = total_days;
        breakdown.total_extra_shift_worked = total_extra_shifts;
        breakdown.other_wage_additions = considerations.total_additions;
        breakdown.other_wage_deductions = considerations.total_deductions;
        breakdown.notes = notes.join("; ");
        breakdown.regular_days_used = daily.regular_days_used;
        breakdown.extra_days_used = daily.extra_days_used;
        breakdown.ni_days_wage = daily.ni_days_wage;
        breakdown.cash_days_wage = daily.cash_days_wage;
        breakdown.gross_days_wage = daily.gross_days_wage();
        breakdown.extra_shift_wage = daily.extra_shift_wage();
        breakdown.ni_hours_used = hourly.ni_hours_used;
        breakdown.cash_hours_used = hourly.cash_hours_used;
        breakdown.ni_hours_wage = hourly.ni_hours_wage;
        breakdown.cash_hours_wage = hourly.cash_hours_wage;
        breakdown.gross_hours_wage = hourly.gross_hours_wage();
        breakdown.gross_ni_wage = composed.gross_ni_wage;
        breakdown.gross_cash_wage = composed.gross_cash_wage;
        breakdown.total_gross_wage = composed.total_gross_wage;
        breakdown.net_ni_wage = composed.net_ni_wage;
        breakdown.net_cash_wage = composed.net_cash_wage;
        breakdown.total_net_wage = composed.total_net_wage;
        breakdown.eer_nic = nic_tax.er_nic;
        breakdown.ees_nic = nic_tax.ees_nic;
        breakdown.ees_tax = nic_tax.ees_tax;
        breakdown.allocations = allocations;
        breakdown.warnings = composed.warnings;

        Ok(breakdown)
    }

    fn recompute_lock_for(&self, pay_run_id: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .recompute_locks
            .lock()
            .map_err(|_| anyhow!("recompute lock table poisoned"))?;
        Ok(locks
            .entry(pay_run_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    fn validate_period(period_start: &str, period_end: &str) -> Result<()> {
        if !PayRun::is_valid_period_date(period_start) {
            return Err(anyhow!("Invalid period start date: {}", period_start));
        }
        if !PayRun::is_valid_period_date(period_end) {
            return Err(anyhow!("Invalid period end date: {}", period_end));
        }
        if period_start > period_end {
            return Err(anyhow!(
                "Period start {} is after period end {}",
                period_start,
                period_end
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        CashHoursMode, DailyRatesConfig, HourlyRatesConfig, NiDayMode, NiHoursMode, NicTaxEntry,
        PayStructure, TimesheetEntry,
    };

    fn setup_test() -> (
        PayRunService,
        PayStructureRepository,
        TimesheetRepository,
        NicTaxRepository,
    ) {
        let connection = Arc::new(MemoryConnection::new());
        let service = PayRunService::new(connection.clone());
        (
            service,
            connection.create_pay_structure_repository(),
            connection.create_timesheet_repository(),
            connection.create_nic_tax_repository(),
        )
    }

    fn hourly_structure() -> PayStructure {
        PayStructure {
            pay_structure_name: "Hourly staff".to_string(),
            has_hourly_rates: true,
            hourly_rates: HourlyRatesConfig {
                ni_hours_mode: NiHoursMode::Custom,
                min_ni_hours: 0.0,
                max_ni_hours: 40.0,
                percentage_ni_hours: 100.0,
                ni_rate_per_hour: 10.0,
                cash_hours_mode: CashHoursMode::Rest,
                cash_rate_per_hour: 8.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn timesheet_entry(
        timesheet_id: &str,
        employee_id: &str,
        hours: f64,
        location: &str,
    ) -> TimesheetEntry {
        TimesheetEntry {
            timesheet_id: timesheet_id.to_string(),
            timesheet_name: format!("Timesheet {}", timesheet_id),
            location: location.to_string(),
            period_start: "2025-01-01".to_string(),
            period_end: "2025-01-31".to_string(),
            employee_id: employee_id.to_string(),
            hours_worked: hours,
            days_worked: 0.0,
            extra_shift_worked: 0.0,
            other_cash_addition: 0.0,
            other_cash_deduction: 0.0,
            notes: String::new(),
        }
    }

    fn january_run(service: &PayRunService) -> PayRun {
        service
            .create_pay_run(CreatePayRunCommand {
                name: "January".to_string(),
                period_start: "2025-01-01".to_string(),
                period_end: "2025-01-31".to_string(),
            })
            .expect("Failed to create pay run")
            .pay_run
    }

    #[test]
    fn test_create_pay_run_validates_period() {
        let (service, _, _, _) = setup_test();

        let inverted = service.create_pay_run(CreatePayRunCommand {
            name: "Bad".to_string(),
            period_start: "2025-02-01".to_string(),
            period_end: "2025-01-01".to_string(),
        });
        assert!(inverted.is_err());

        let malformed = service.create_pay_run(CreatePayRunCommand {
            name: "Bad".to_string(),
            period_start: "01/01/2025".to_string(),
            period_end: "2025-01-31".to_string(),
        });
        assert!(malformed.is_err());
    }

    #[test]
    fn test_recompute_produces_breakdown_per_eligible_employee() {
        let (service, structures, timesheets, nic_tax) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        structures
            .store_pay_structure("emp-2", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-2", 20.0, "Main St"))
            .expect("Failed to store entry");
        nic_tax
            .store_entry(&NicTaxEntry {
                record_id: "N1".to_string(),
                location: "Main St".to_string(),
                period_start: "2025-01-01".to_string(),
                period_end: "2025-01-31".to_string(),
                employee_id: "emp-1".to_string(),
                er_nic: 30.0,
                ees_nic: 20.0,
                ees_tax: 50.0,
            })
            .expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        assert!(result.failures.is_empty());
        assert_eq!(result.breakdowns.len(), 2);
        let emp1 = &result.breakdowns[0];
        assert_eq!(emp1.employee_id, "emp-1");
        assert_eq!(emp1.ni_hours_wage, 400.0);
        assert_eq!(emp1.net_ni_wage, 400.0 - 20.0 - 50.0);
        assert_eq!(emp1.eer_nic, 30.0);

        let stored = service
            .list_breakdowns(&run.id)
            .expect("Failed to list breakdowns");
        assert_eq!(stored, result.breakdowns);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 30.0, "Main St"))
            .expect("Failed to store entry");
        timesheets
            .store_entry(&timesheet_entry("T2", "emp-1", 18.0, "High St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        let first = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");
        let second = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        let first_json =
            serde_json::to_string(&first.breakdowns).expect("Failed to serialize breakdowns");
        let second_json =
            serde_json::to_string(&second.breakdowns).expect("Failed to serialize breakdowns");
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_recompute_isolates_per_employee_failures() {
        let (service, structures, timesheets, _) = setup_test();
        // emp-1 has no pay structure; emp-2 is fully configured
        structures
            .store_pay_structure("emp-2", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-2", 20.0, "Main St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        assert_eq!(result.breakdowns.len(), 1);
        assert_eq!(result.breakdowns[0].employee_id, "emp-2");
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].employee_id, "emp-1");
        assert!(result.failures[0].reason.contains("no pay structure"));
    }

    #[test]
    fn test_recompute_splits_wage_across_locations() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 30.0, "Main St"))
            .expect("Failed to store entry");
        timesheets
            .store_entry(&timesheet_entry("T2", "emp-1", 10.0, "High St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        let breakdown = &result.breakdowns[0];
        assert_eq!(breakdown.total_hours, 40.0);
        assert_eq!(breakdown.allocations.len(), 2);
        assert_eq!(breakdown.allocations[0].hours_ratio, 0.75);
        assert_eq!(breakdown.allocations[0].location, "Main St");
        assert_eq!(breakdown.allocations[1].hours_ratio, 0.25);
    }

    #[test]
    fn test_single_timesheet_breakdown_has_no_allocations() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");
        assert!(result.breakdowns[0].allocations.is_empty());
    }

    #[test]
    fn test_recompute_requires_draft_state() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        service.approve_pay_run(&run.id).expect("Failed to approve");

        let result = service.recompute_pay_run(&run.id);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Cannot recompute a pay run in Approved state"));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let (service, _, _, _) = setup_test();
        let run = january_run(&service);

        // Draft cannot be marked paid directly
        assert!(service.mark_pay_run_paid(&run.id).is_err());

        let approved = service.approve_pay_run(&run.id).expect("Failed to approve");
        assert_eq!(approved.pay_run.status, PayRunStatus::Approved);

        let reverted = service
            .revert_pay_run_to_draft(&run.id)
            .expect("Failed to revert");
        assert_eq!(reverted.pay_run.status, PayRunStatus::Draft);

        service.approve_pay_run(&run.id).expect("Failed to approve");
        let paid = service.mark_pay_run_paid(&run.id).expect("Failed to mark paid");
        assert_eq!(paid.pay_run.status, PayRunStatus::Paid);

        // Paid is terminal
        assert!(service.revert_pay_run_to_draft(&run.id).is_err());
        assert!(service.approve_pay_run(&run.id).is_err());
    }

    #[test]
    fn test_flagging_and_recompute_clear_needs_recalculation() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");

        let run = january_run(&service);
        let flagged = service
            .flag_recalculation_for_period("2025-01-15", "2025-01-21")
            .expect("Failed to flag");
        assert_eq!(flagged, vec![run.id.clone()]);
        assert!(service.get_pay_run(&run.id).expect("Failed to get run").needs_recalculation);

        service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");
        assert!(!service.get_pay_run(&run.id).expect("Failed to get run").needs_recalculation);

        // Disjoint periods do not flag
        let flagged = service
            .flag_recalculation_for_period("2025-03-01", "2025-03-31")
            .expect("Failed to flag");
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_compute_breakdown_is_ad_hoc_and_unpersisted() {
        let (service, structures, timesheets, _) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        timesheets
            .store_entry(&timesheet_entry("T1", "emp-1", 40.0, "Main St"))
            .expect("Failed to store entry");

        let breakdown = service
            .compute_breakdown(ComputeBreakdownCommand {
                employee_id: "emp-1".to_string(),
                period_start: "2025-01-01".to_string(),
                period_end: "2025-01-31".to_string(),
            })
            .expect("Failed to compute breakdown");

        assert_eq!(
            breakdown.id,
            "breakdown::period::2025-01-01::2025-01-31::emp-1"
        );
        assert_eq!(breakdown.ni_hours_wage, 400.0);
    }

    #[test]
    fn test_daily_structure_end_to_end() {
        let (service, structures, timesheets, _) = setup_test();
        let structure = PayStructure {
            pay_structure_name: "Daily staff".to_string(),
            has_daily_rates: true,
            daily_rates: DailyRatesConfig {
                ni_day_mode: NiDayMode::All,
                ni_regular_days: 20.0,
                ni_regular_day_rate: 18.5,
                ni_extra_day_rate: 25.0,
                ni_extra_shift_rate: 20.0,
                ..Default::default()
            },
            ..Default::default()
        };
        structures
            .store_pay_structure("emp-1", &structure)
            .expect("Failed to store pay structure");

        let mut entry = timesheet_entry("T1", "emp-1", 0.0, "Main St");
        entry.days_worked = 20.0;
        entry.extra_shift_worked = 1.0;
        timesheets.store_entry(&entry).expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        let breakdown = &result.breakdowns[0];
        assert_eq!(breakdown.regular_days_used, 20.0);
        assert_eq!(breakdown.extra_days_used, 0.0);
        assert_eq!(breakdown.ni_days_wage, 370.0);
        assert_eq!(breakdown.extra_shift_wage, 20.0);
        assert_eq!(breakdown.total_gross_wage, 390.0);
    }

    #[test]
    fn test_zero_attendance_employee_with_nic_entry_only() {
        let (service, structures, _, nic_tax) = setup_test();
        structures
            .store_pay_structure("emp-1", &hourly_structure())
            .expect("Failed to store pay structure");
        nic_tax
            .store_entry(&NicTaxEntry {
                record_id: "N1".to_string(),
                location: "Main St".to_string(),
                period_start: "2025-01-01".to_string(),
                period_end: "2025-01-31".to_string(),
                employee_id: "emp-1".to_string(),
                er_nic: 0.0,
                ees_nic: 15.0,
                ees_tax: 0.0,
            })
            .expect("Failed to store entry");

        let run = january_run(&service);
        let result = service
            .recompute_pay_run(&run.id)
            .expect("Failed to recompute pay run");

        // No timesheets at all: zero wages, withholdings push net negative,
        // surfaced as a warning rather than an error
        let breakdown = &result.breakdowns[0];
        assert_eq!(breakdown.total_hours, 0.0);
        assert_eq!(breakdown.total_gross_wage, 0.0);
        assert_eq!(breakdown.net_ni_wage, -15.0);
        assert_eq!(breakdown.warnings.len(), 1);
        assert!(breakdown.allocations.is_empty());
    }
}
