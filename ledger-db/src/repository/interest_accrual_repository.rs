use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;

use crate::models::interest::InterestAccrualLegModel;

#[async_trait]
pub trait InterestAccrualRepository: Send + Sync {
    async fn insert_leg(&self, leg: InterestAccrualLegModel) -> LedgerResult<()>;

    async fn find_pending(&self, accrual_date: NaiveDate) -> LedgerResult<Vec<InterestAccrualLegModel>>;

    async fn mark_processed(&self, accr_tran_id: &str) -> LedgerResult<()>;

    /// `MAX(seq in existing ids for that date)`, for the monotonic
    /// per-accrual-date sequence of spec.md §4.8 step 5.
    async fn max_seq_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<u32>;

    /// Delete-before-reinsert support for EOD Job 2 re-runs (spec.md §9).
    async fn delete_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<()>;
}
