use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::account::DrCrFlag;
use crate::domain::balance::{AccountBalanceRow, GlBalanceRow};
use crate::error::LedgerResult;

/// C4 — per-account and per-GL daily balance rows, and the "latest ≤ D"
/// lookup every other component relies on (spec.md §4.4).
#[async_trait]
pub trait BalanceStoreService: Send + Sync {
    /// The row for the greatest `tran_date <= as_of`.
    async fn latest_by_account(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceRow>>;

    /// Creates-if-absent a row at `System_Date` with zeros on first posting.
    async fn today_row(&self, account_no: &str) -> LedgerResult<AccountBalanceRow>;

    /// Atomically increments `dr_summation`/`cr_summation`, recomputes
    /// `current_balance`/`available_balance`, stamps `last_updated`.
    async fn update_for_posting(&self, account_no: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<AccountBalanceRow>;

    async fn latest_by_gl(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceRow>>;

    async fn today_gl_row(&self, gl_num: &str) -> LedgerResult<GlBalanceRow>;

    async fn update_gl_for_posting(&self, gl_num: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<GlBalanceRow>;
}

/// C7 — real-time available balance computed on demand (spec.md §4.7).
#[async_trait]
pub trait BalanceQueryService: Send + Sync {
    /// `opening + todayCredits - todayDebits (+ loanLimit on assets)`.
    async fn available_balance(&self, account_no: &str) -> LedgerResult<Decimal>;

    /// The 3-tier previous-closing-balance fallback of spec.md §4.7:
    /// `system_date - 1` row, else the latest row before `system_date`,
    /// else zero for a brand-new account.
    async fn previous_closing_balance(&self, account_no: &str, system_date: NaiveDate) -> LedgerResult<Decimal>;
}
