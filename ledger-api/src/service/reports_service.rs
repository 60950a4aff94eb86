use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::reports::{BalanceSheetReport, TrialBalanceReport};
use crate::error::LedgerResult;

/// C10 — Trial Balance (CSV) and Balance Sheet (XLSX) from the closed-day
/// GL balances (spec.md §4.10, EOD Job 7). `TrialBalanceImbalanced` aborts
/// report generation (and thus the job) when DR != CR to the cent.
#[async_trait]
pub trait ReportsService: Send + Sync {
    async fn trial_balance(&self, tran_date: NaiveDate) -> LedgerResult<TrialBalanceReport>;

    async fn balance_sheet(&self, tran_date: NaiveDate) -> LedgerResult<BalanceSheetReport>;

    /// Render both reports to `reports/<yyyymmdd>/` and return their paths.
    async fn write_reports(&self, tran_date: NaiveDate) -> LedgerResult<(String, String)>;
}
