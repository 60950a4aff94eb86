use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error kinds for the ledger core, grouped the way spec.md §7 groups them:
/// NotFound, BusinessRule, Conflict, InvariantViolation, Transient,
/// Configuration, IOError. Each admin-facing caller maps a variant to an
/// HTTP status via [`LedgerError::status_hint`] without this crate depending
/// on an HTTP framework.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("GL not found: {0}")]
    GlNotFound(String),

    #[error("account {account_no} is inactive ({status})")]
    AccountInactive { account_no: String, status: String },

    #[error("transaction is unbalanced: debits {debit_total}, credits {credit_total}")]
    Unbalanced {
        debit_total: rust_decimal::Decimal,
        credit_total: rust_decimal::Decimal,
    },

    #[error("insufficient balance on {account_no}: requested {requested}, available {available}")]
    InsufficientBalance {
        account_no: String,
        requested: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    #[error("office account sequence exhausted for GL {gl_num}")]
    AccountSeqExhausted { gl_num: String },

    #[error("account {account_no} cannot be closed with non-zero balance {balance}")]
    NonZeroClosure {
        account_no: String,
        balance: rust_decimal::Decimal,
    },

    #[error("original transaction not found: {0}")]
    OriginalNotFound(String),

    #[error("transaction {0} already verified")]
    AlreadyVerified(String),

    #[error("transaction {0} is not in Entry state")]
    NotEntry(String),

    #[error("EOD job {job_name} already executed for {eod_date}")]
    AlreadyExecuted { job_name: String, eod_date: chrono::NaiveDate },

    #[error("EOD job {job_name} cannot run before {required_job} completes")]
    PriorJobNotCompleted { job_name: String, required_job: String },

    #[error("trial balance imbalanced on {tran_date}: debit total {debit_total}, credit total {credit_total}")]
    TrialBalanceImbalanced {
        tran_date: chrono::NaiveDate,
        debit_total: rust_decimal::Decimal,
        credit_total: rust_decimal::Decimal,
    },

    #[error("GL balance cross-check failed for {gl_num} on {tran_date}")]
    GlCrossCheckFailed {
        gl_num: String,
        tran_date: chrono::NaiveDate,
    },

    #[error("System_Date is not configured")]
    SystemDateNotConfigured,

    #[error("no interest rate configured for account {account_no}")]
    NoRateConfigured { account_no: String },

    #[error("no GL mapping configured for account {account_no}: {detail}")]
    GlNotConfigured { account_no: String, detail: String },

    #[error("balance row missing for account {account_no} on {tran_date}")]
    BalanceRowMissing {
        account_no: String,
        tran_date: chrono::NaiveDate,
    },

    #[error("unit of work deadlocked, retries exhausted ({attempts})")]
    Transient { attempts: u32 },

    #[error("validation error in {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("report I/O error: {0}")]
    IoError(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// HTTP status an admin endpoint should surface for this error kind
    /// (spec.md §7: 400 BusinessRule/Configuration, 404 NotFound,
    /// 409 Conflict, 500 IOError/InvariantViolation).
    pub fn status_hint(&self) -> u16 {
        match self {
            LedgerError::AccountNotFound(_)
            | LedgerError::TransactionNotFound(_)
            | LedgerError::GlNotFound(_)
            | LedgerError::OriginalNotFound(_) => 404,

            LedgerError::AlreadyVerified(_)
            | LedgerError::NotEntry(_)
            | LedgerError::AlreadyExecuted { .. }
            | LedgerError::PriorJobNotCompleted { .. } => 409,

            LedgerError::TrialBalanceImbalanced { .. }
            | LedgerError::GlCrossCheckFailed { .. }
            | LedgerError::Internal(_) => 500,

            LedgerError::IoError(_) => 500,

            LedgerError::Transient { .. } => 503,

            LedgerError::AccountInactive { .. }
            | LedgerError::Unbalanced { .. }
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::AccountSeqExhausted { .. }
            | LedgerError::NonZeroClosure { .. }
            | LedgerError::ValidationError { .. } => 400,

            LedgerError::SystemDateNotConfigured
            | LedgerError::NoRateConfigured { .. }
            | LedgerError::GlNotConfigured { .. }
            | LedgerError::BalanceRowMissing { .. } => 400,
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            message: self.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// `{ success: false, message, timestamp }` envelope from spec.md §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        LedgerError::Internal(err.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => LedgerError::Internal("row not found".to_string()),
            sqlx::Error::Database(ref db_err) => {
                LedgerError::Internal(format!("database error: {}", db_err.message()))
            }
            other => LedgerError::Internal(format!("database error: {other}")),
        }
    }
}
