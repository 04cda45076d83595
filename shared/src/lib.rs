use serde::{Deserialize, Serialize};
use std::fmt;

/// How the NI side of a daily-rate pay structure consumes attendance days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiDayMode {
    /// NI side pays nothing for days
    None,
    /// NI side pays every day worked, splitting into regular and extra days
    All,
    /// NI side pays a guaranteed wage independent of attendance
    Fixed,
}

/// How the cash side of a daily-rate pay structure consumes attendance days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashDayMode {
    /// Cash side pays nothing for days
    None,
    /// Cash side pays every day worked, splitting into regular and extra days
    All,
}

/// How the NI side of an hourly-rate pay structure consumes worked hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiHoursMode {
    /// NI side pays every hour worked
    All,
    /// NI side pays nothing for hours
    None,
    /// NI side pays a percentage of the hours clamped between min and max
    Custom,
    /// NI side pays a fixed hour count independent of attendance
    Fixed,
}

/// How the cash side of an hourly-rate pay structure consumes worked hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashHoursMode {
    /// Cash side pays exactly the hours not claimed by the NI side
    Rest,
    /// Cash side pays every hour worked
    All,
    /// Cash side pays nothing for hours
    None,
    /// Cash side pays a percentage of the hours clamped between min and max
    Custom,
}

/// Daily-rate configuration for a pay structure.
///
/// The NI side and the cash side both read the same raw attendance figures
/// but apply independent rate tables. The `ni_extra_*` rates only apply in
/// `All` mode; in `Fixed` mode they must be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRatesConfig {
    pub ni_day_mode: NiDayMode,
    pub ni_regular_days: f64,
    pub ni_regular_day_rate: f64,
    pub ni_extra_day_rate: f64,
    pub ni_extra_shift_rate: f64,
    pub cash_day_mode: CashDayMode,
    pub cash_regular_days: f64,
    pub cash_regular_day_rate: f64,
    pub cash_extra_day_rate: f64,
    pub cash_extra_shift_rate: f64,
}

impl Default for DailyRatesConfig {
    fn default() -> Self {
        Self {
            ni_day_mode: NiDayMode::None,
            ni_regular_days: 0.0,
            ni_regular_day_rate: 0.0,
            ni_extra_day_rate: 0.0,
            ni_extra_shift_rate: 0.0,
            cash_day_mode: CashDayMode::None,
            cash_regular_days: 0.0,
            cash_regular_day_rate: 0.0,
            cash_extra_day_rate: 0.0,
            cash_extra_shift_rate: 0.0,
        }
    }
}

/// Hourly-rate configuration for a pay structure.
///
/// The clamp bounds and percentage only apply in `Custom` mode, and
/// `fixed_ni_hours` only applies in `Fixed` mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRatesConfig {
    pub ni_hours_mode: NiHoursMode,
    pub min_ni_hours: f64,
    pub max_ni_hours: f64,
    pub percentage_ni_hours: f64,
    pub fixed_ni_hours: f64,
    pub ni_rate_per_hour: f64,
    pub cash_hours_mode: CashHoursMode,
    pub min_cash_hours: f64,
    pub max_cash_hours: f64,
    pub percentage_cash_hours: f64,
    pub cash_rate_per_hour: f64,
}

impl Default for HourlyRatesConfig {
    fn default() -> Self {
        Self {
            ni_hours_mode: NiHoursMode::None,
            min_ni_hours: 0.0,
            max_ni_hours: 0.0,
            percentage_ni_hours: 0.0,
            fixed_ni_hours: 0.0,
            ni_rate_per_hour: 0.0,
            cash_hours_mode: CashHoursMode::None,
            min_cash_hours: 0.0,
            max_cash_hours: 0.0,
            percentage_cash_hours: 0.0,
            cash_rate_per_hour: 0.0,
        }
    }
}

/// A single named addition or deduction (amount signed, names may repeat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsiderationItem {
    pub name: String,
    pub amount: f64,
}

/// Named additions and deductions applied on top of the computed wages
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OtherConsiderations {
    pub note: String,
    pub ni_additions: Vec<ConsiderationItem>,
    pub ni_deductions: Vec<ConsiderationItem>,
    pub cash_additions: Vec<ConsiderationItem>,
    pub cash_deductions: Vec<ConsiderationItem>,
}

/// An employee's pay structure configuration.
///
/// Daily and hourly rates are mutually exclusive at the employee level:
/// at most one of `has_daily_rates` and `has_hourly_rates` may be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayStructure {
    pub pay_structure_name: String,
    pub has_daily_rates: bool,
    pub daily_rates: DailyRatesConfig,
    pub has_hourly_rates: bool,
    pub hourly_rates: HourlyRatesConfig,
    pub has_other_considerations: bool,
    pub other_considerations: OtherConsiderations,
}

impl Default for PayStructure {
    fn default() -> Self {
        Self {
            pay_structure_name: String::new(),
            has_daily_rates: false,
            daily_rates: DailyRatesConfig::default(),
            has_hourly_rates: false,
            hourly_rates: HourlyRatesConfig::default(),
            has_other_considerations: false,
            other_considerations: OtherConsiderations::default(),
        }
    }
}

/// One employee's row on a timesheet, tagged with the owning timesheet's
/// id, name, location and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// ID of the owning timesheet in format: "timesheet::epoch_millis"
    pub timesheet_id: String,
    pub timesheet_name: String,
    pub location: String,
    /// Period covered by the owning timesheet (ISO 8601, YYYY-MM-DD)
    pub period_start: String,
    pub period_end: String,
    pub employee_id: String,
    pub hours_worked: f64,
    pub days_worked: f64,
    pub extra_shift_worked: f64,
    pub other_cash_addition: f64,
    pub other_cash_deduction: f64,
    pub notes: String,
}

/// One employee's row on a NIC/Tax record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicTaxEntry {
    /// ID of the owning NIC/Tax record in format: "nictax::epoch_millis"
    pub record_id: String,
    pub location: String,
    /// Period covered by the owning record (ISO 8601, YYYY-MM-DD)
    pub period_start: String,
    pub period_end: String,
    pub employee_id: String,
    /// Employer National Insurance contribution (informational, cost reporting)
    pub er_nic: f64,
    /// Employee National Insurance contribution (withheld from NI-side wage)
    pub ees_nic: f64,
    /// Employee income tax (withheld from NI-side wage)
    pub ees_tax: f64,
}

/// Pro-rated share of one breakdown attributed to a contributing timesheet.
///
/// References the source timesheet by id only; the field names `F1..F11`
/// are the persisted contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetAllocation {
    pub timesheet_id: String,
    pub timesheet_name: String,
    pub location: String,
    #[serde(rename = "F1_hoursRatio")]
    pub hours_ratio: f64,
    #[serde(rename = "F2_daysRatio")]
    pub days_ratio: f64,
    #[serde(rename = "F3_extraShiftRatio")]
    pub extra_shift_ratio: f64,
    #[serde(rename = "F4_allocHoursWage")]
    pub alloc_hours_wage: f64,
    #[serde(rename = "F5_allocDaysWage")]
    pub alloc_days_wage: f64,
    #[serde(rename = "F6_allocExtraShiftWage")]
    pub alloc_extra_shift_wage: f64,
    #[serde(rename = "F7_wageRatio")]
    pub wage_ratio: f64,
    #[serde(rename = "F8_allocGrossNIWage")]
    pub alloc_gross_ni_wage: f64,
    #[serde(rename = "F9_allocGrossCashWage")]
    pub alloc_gross_cash_wage: f64,
    #[serde(rename = "F10_allocEerNIC")]
    pub alloc_eer_nic: f64,
    #[serde(rename = "F11_allocWageCost")]
    pub alloc_wage_cost: f64,
}

/// The computed wage breakdown for one employee in one pay run.
///
/// The `E1..E23` and `D1..D3` field names are the persisted contract and
/// must remain numerically stable across implementations. Monetary values
/// carry full precision; rounding to 2 decimal places happens only at
/// presentation time via [`round_money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageBreakdown {
    /// Breakdown ID in format: "breakdown::<scope>::<employee_id>"
    pub id: String,
    pub employee_id: String,
    #[serde(rename = "E1_totalHours")]
    pub total_hours: f64,
    #[serde(rename = "E2_totalDays")]
    pub total_days: f64,
    #[serde(rename = "E3_totalExtraShiftWorked")]
    pub total_extra_shift_worked: f64,
    #[serde(rename = "E4_otherWageAdditions")]
    pub other_wage_additions: f64,
    #[serde(rename = "E5_otherWageDeductions")]
    pub other_wage_deductions: f64,
    #[serde(rename = "E6_notes")]
    pub notes: String,
    #[serde(rename = "E7_regularDaysUsed")]
    pub regular_days_used: f64,
    #[serde(rename = "E8_extraDaysUsed")]
    pub extra_days_used: f64,
    #[serde(rename = "E9_NIDaysWage")]
    pub ni_days_wage: f64,
    #[serde(rename = "E10_cashDaysWage")]
    pub cash_days_wage: f64,
    #[serde(rename = "E11_grossDaysWage")]
    pub gross_days_wage: f64,
    #[serde(rename = "E12_extraShiftWage")]
    pub extra_shift_wage: f64,
    #[serde(rename = "E13_NIHoursUsed")]
    pub ni_hours_used: f64,
    #[serde(rename = "E14_cashHoursUsed")]
    pub cash_hours_used: f64,
    #[serde(rename = "E15_NIHoursWage")]
    pub ni_hours_wage: f64,
    #[serde(rename = "E16_cashHoursWage")]
    pub cash_hours_wage: f64,
    #[serde(rename = "E17_grossHoursWage")]
    pub gross_hours_wage: f64,
    #[serde(rename = "E18_grossNIWage")]
    pub gross_ni_wage: f64,
    #[serde(rename = "E19_grossCashWage")]
    pub gross_cash_wage: f64,
    #[serde(rename = "E20_totalGrossWage")]
    pub total_gross_wage: f64,
    #[serde(rename = "E21_netNIWage")]
    pub net_ni_wage: f64,
    #[serde(rename = "E22_netCashWage")]
    pub net_cash_wage: f64,
    #[serde(rename = "E23_totalNetWage")]
    pub total_net_wage: f64,
    #[serde(rename = "D1_eerNIC")]
    pub eer_nic: f64,
    #[serde(rename = "D2_eesNIC")]
    pub ees_nic: f64,
    #[serde(rename = "D3_eesTax")]
    pub ees_tax: f64,
    /// Present only when two or more timesheets contributed to the totals
    pub allocations: Vec<TimesheetAllocation>,
    /// Non-fatal review flags, e.g. a negative NI-side net wage
    pub warnings: Vec<String>,
}

/// Lifecycle state of a pay run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayRunStatus {
    /// Freely recomputable
    Draft,
    /// Locked; may be reverted to Draft or marked Paid
    Approved,
    /// Terminal
    Paid,
}

impl fmt::Display for PayRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayRunStatus::Draft => write!(f, "Draft"),
            PayRunStatus::Approved => write!(f, "Approved"),
            PayRunStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// A batch of wage computations for all eligible employees over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRun {
    /// Pay run ID in format: "payrun::epoch_millis"
    pub id: String,
    pub name: String,
    /// Inclusive period bounds (ISO 8601, YYYY-MM-DD)
    pub period_start: String,
    pub period_end: String,
    pub status: PayRunStatus,
    /// Set when an underlying timesheet or NIC/Tax record changed while the
    /// run was in Draft; cleared by the next recompute
    pub needs_recalculation: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new pay run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePayRunRequest {
    pub name: String,
    pub period_start: String, // ISO 8601 date format (YYYY-MM-DD)
    pub period_end: String,   // ISO 8601 date format (YYYY-MM-DD)
}

/// Response after creating or transitioning a pay run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayRunResponse {
    pub pay_run: PayRun,
    pub success_message: String,
}

/// Response containing a list of pay runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayRunListResponse {
    pub pay_runs: Vec<PayRun>,
}

/// Request for computing a single employee's breakdown over a period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputeBreakdownRequest {
    pub employee_id: String,
    pub period_start: String, // ISO 8601 date format (YYYY-MM-DD)
    pub period_end: String,   // ISO 8601 date format (YYYY-MM-DD)
}

/// One employee whose breakdown could not be computed during a recompute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeComputeFailure {
    pub employee_id: String,
    pub reason: String,
}

/// Response after recomputing a pay run.
///
/// Failed employees are listed with their error reason; successful
/// employees' breakdowns are saved normally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecomputePayRunResponse {
    pub pay_run: PayRun,
    pub breakdowns: Vec<WageBreakdown>,
    pub failures: Vec<EmployeeComputeFailure>,
    pub success_message: String,
}

/// Response after saving a timesheet entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveTimesheetEntryResponse {
    pub entry: TimesheetEntry,
    /// Pay run IDs flagged for recalculation by this save
    pub flagged_pay_run_ids: Vec<String>,
    pub success_message: String,
}

/// Response after saving a NIC/Tax entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveNicTaxEntryResponse {
    pub entry: NicTaxEntry,
    /// Pay run IDs flagged for recalculation by this save
    pub flagged_pay_run_ids: Vec<String>,
    pub success_message: String,
}

/// Round a monetary value to 2 decimal places, half away from zero.
///
/// Applied only at presentation time; internal computation retains full
/// precision.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl PayRun {
    /// Generate a pay run ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("payrun::{}", epoch_millis)
    }

    /// Parse a pay run ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, PayRunIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "payrun" {
            return Err(PayRunIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| PayRunIdError::InvalidTimestamp)
    }

    /// Validate a period date string (ISO 8601, YYYY-MM-DD)
    pub fn is_valid_period_date(date: &str) -> bool {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
    }

    /// Whether this run's period overlaps the given period.
    ///
    /// Bounds are inclusive; ISO dates compare correctly as strings.
    pub fn overlaps_period(&self, period_start: &str, period_end: &str) -> bool {
        self.period_start.as_str() <= period_end && period_start <= self.period_end.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayRunIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for PayRunIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayRunIdError::InvalidFormat => write!(f, "Invalid pay run ID format"),
            PayRunIdError::InvalidTimestamp => write!(f, "Invalid timestamp in pay run ID"),
        }
    }
}

impl std::error::Error for PayRunIdError {}

impl WageBreakdown {
    /// Generate a breakdown ID from the owning scope (a pay run ID or an
    /// ad-hoc period tag) and the employee ID.
    ///
    /// Deliberately excludes any timestamp so that recomputing a Draft pay
    /// run with unchanged inputs reproduces an identical breakdown.
    pub fn generate_id(scope: &str, employee_id: &str) -> String {
        format!("breakdown::{}::{}", scope, employee_id)
    }

    /// An all-zero breakdown for the given employee, used as the base that
    /// each calculator fills in
    pub fn empty(id: String, employee_id: String) -> Self {
        Self {
            id,
            employee_id,
            total_hours: 0.0,
            total_days: 0.0,
            total_extra_shift_worked: 0.0,
            other_wage_additions: 0.0,
            other_wage_deductions: 0.0,
            notes: String::new(),
            regular_days_used: 0.0,
            extra_days_used: 0.0,
            ni_days_wage: 0.0,
            cash_days_wage: 0.0,
            gross_days_wage: 0.0,
            extra_shift_wage: 0.0,
            ni_hours_used: 0.0,
            cash_hours_used: 0.0,
            ni_hours_wage: 0.0,
            cash_hours_wage: 0.0,
            gross_hours_wage: 0.0,
            gross_ni_wage: 0.0,
            gross_cash_wage: 0.0,
            total_gross_wage: 0.0,
            net_ni_wage: 0.0,
            net_cash_wage: 0.0,
            total_net_wage: 0.0,
            eer_nic: 0.0,
            ees_nic: 0.0,
            ees_tax: 0.0,
            allocations: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl TimesheetEntry {
    /// Generate a timesheet ID from a timestamp
    pub fn generate_timesheet_id(epoch_millis: u64) -> String {
        format!("timesheet::{}", epoch_millis)
    }
}

impl NicTaxEntry {
    /// Generate a NIC/Tax record ID from a timestamp
    pub fn generate_record_id(epoch_millis: u64) -> String {
        format!("nictax::{}", epoch_millis)
    }
}
