use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The single authoritative business date, plus the last-EOD bookkeeping
/// columns (spec.md §3 "Parameter Table").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemParameters {
    pub system_date: NaiveDate,
    pub last_eod_date: Option<NaiveDate>,
    pub last_eod_timestamp: Option<DateTime<Utc>>,
    pub last_eod_user: Option<String>,
}

/// The eight EOD jobs, in the fixed execution order of spec.md §4.9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EodJob {
    AccountBalanceUpdate,
    InterestAccrualTransactions,
    InterestAccrualGlMovements,
    GlMovementUpdate,
    GlBalanceUpdate,
    InterestAccrualAccountBalance,
    FinancialReports,
    SystemDateIncrement,
}

impl EodJob {
    pub const ORDER: [EodJob; 8] = [
        EodJob::AccountBalanceUpdate,
        EodJob::InterestAccrualTransactions,
        EodJob::InterestAccrualGlMovements,
        EodJob::GlMovementUpdate,
        EodJob::GlBalanceUpdate,
        EodJob::InterestAccrualAccountBalance,
        EodJob::FinancialReports,
        EodJob::SystemDateIncrement,
    ];

    pub fn job_number(self) -> u8 {
        Self::ORDER.iter().position(|j| *j == self).unwrap() as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            EodJob::AccountBalanceUpdate => "AccountBalanceUpdate",
            EodJob::InterestAccrualTransactions => "InterestAccrualTransactions",
            EodJob::InterestAccrualGlMovements => "InterestAccrualGlMovements",
            EodJob::GlMovementUpdate => "GlMovementUpdate",
            EodJob::GlBalanceUpdate => "GlBalanceUpdate",
            EodJob::InterestAccrualAccountBalance => "InterestAccrualAccountBalance",
            EodJob::FinancialReports => "FinancialReports",
            EodJob::SystemDateIncrement => "SystemDateIncrement",
        }
    }

    /// The job that must have logged Success on the same `System_Date`
    /// before this one may start (spec.md §4.9); `None` for the first job.
    pub fn predecessor(self) -> Option<EodJob> {
        let idx = Self::ORDER.iter().position(|j| *j == self).unwrap();
        if idx == 0 {
            None
        } else {
            Some(Self::ORDER[idx - 1])
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EodJobStatus {
    Running,
    Success,
    Failed,
}

/// `(eod_date, job_name, start_timestamp)` key row (spec.md §3 "EOD Log").
/// Start and completion are written in separately committed units so the
/// log survives rollback of the job's own work (spec.md §4.9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EodLogEntry {
    pub eod_date: NaiveDate,
    pub job_name: String,
    pub start_timestamp: DateTime<Utc>,
    pub end_timestamp: Option<DateTime<Utc>>,
    pub records_processed: i64,
    pub status: EodJobStatus,
    pub error_message: Option<String>,
    pub failed_at_step: Option<String>,
}

/// Aggregate counters the `/admin/run-eod` endpoint would return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EodRunSummary {
    pub eod_date: NaiveDate,
    pub jobs: Vec<EodJobOutcome>,
    pub new_system_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EodJobOutcome {
    pub job: EodJob,
    pub status: EodJobStatus,
    pub records_processed: i64,
    pub error_message: Option<String>,
}

/// Summary emitted by the BOD processor (spec.md §4.11).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodSummary {
    pub run_date: NaiveDate,
    pub pending_before: i64,
    pub pending_after: i64,
    pub processed: i64,
    pub errors: Vec<String>,
}
