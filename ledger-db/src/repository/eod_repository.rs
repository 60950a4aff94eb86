use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;

use crate::models::eod::{EodLogModel, ParameterModel};

/// `Parameter_Table` access (spec.md §4.1). `System_Date` is a
/// single-writer resource (spec.md §5): only Job 8 or the admin setter call
/// `set_system_date`.
#[async_trait]
pub trait ParameterRepository: Send + Sync {
    async fn get(&self) -> LedgerResult<Option<ParameterModel>>;

    async fn set_system_date(&self, date: NaiveDate, user_id: &str, now: chrono::DateTime<chrono::Utc>) -> LedgerResult<()>;
}

/// `EOD_Log_Table` access (spec.md §4.9). Start and completion rows are
/// written in separately committed units by the caller; this trait exposes
/// the two writes independently so that guarantee can hold.
#[async_trait]
pub trait EodLogRepository: Send + Sync {
    async fn insert_start(&self, entry: EodLogModel) -> LedgerResult<()>;

    async fn complete(
        &self,
        eod_date: NaiveDate,
        job_name: &str,
        start_timestamp: chrono::DateTime<chrono::Utc>,
        end_timestamp: chrono::DateTime<chrono::Utc>,
        records_processed: i64,
        status: &str,
        error_message: Option<String>,
        failed_at_step: Option<String>,
    ) -> LedgerResult<()>;

    /// The most recent log row for `(eod_date, job_name)`, used to decide
    /// `AlreadyExecuted` / predecessor-completed gating (spec.md §4.9).
    async fn latest(&self, eod_date: NaiveDate, job_name: &str) -> LedgerResult<Option<EodLogModel>>;

    async fn all_for_date(&self, eod_date: NaiveDate) -> LedgerResult<Vec<EodLogModel>>;
}
