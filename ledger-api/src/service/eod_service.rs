use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::eod::{EodJob, EodJobOutcome, EodRunSummary, SystemParameters};
use crate::error::LedgerResult;

/// C9 — orchestrates the eight sequential EOD jobs (spec.md §4.9). Each job
/// logs Running at start and Success/Failed at completion in independently
/// committed units; re-running an already-Succeeded job for the current
/// `System_Date` is a no-op returning `AlreadyExecuted`.
#[async_trait]
pub trait EodService: Send + Sync {
    /// Run a single job. Fails with `PriorJobNotCompleted` if its
    /// predecessor hasn't logged Success yet, or `AlreadyExecuted` if this
    /// job already has.
    async fn run_job(&self, job: EodJob, user_id: &str) -> LedgerResult<EodJobOutcome>;

    /// Run all eight jobs in order for the current `System_Date`.
    async fn run_all(&self, user_id: &str) -> LedgerResult<EodRunSummary>;

    async fn status(&self) -> LedgerResult<SystemParameters>;
}
