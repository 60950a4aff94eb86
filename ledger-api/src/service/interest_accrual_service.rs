use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::interest::AccrualReport;
use crate::error::LedgerResult;

/// C8 — EOD Job 2: daily interest computation per spec.md §4.8. Per-account
/// errors (`NoRateConfigured`, `BalanceRowMissing`, `GLNotConfigured`) are
/// captured and counted in the returned report rather than aborting the
/// batch (spec.md §7).
#[async_trait]
pub trait InterestAccrualService: Send + Sync {
    async fn accrue_all(&self, accrual_date: NaiveDate) -> LedgerResult<AccrualReport>;
}
