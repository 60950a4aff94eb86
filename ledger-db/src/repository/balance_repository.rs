use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;

use crate::models::balance::{AccountBalanceAccrualModel, AccountBalanceModel, GlBalanceModel};

#[async_trait]
pub trait BalanceRepository: Send + Sync {
    async fn find_account_row(&self, account_no: &str, tran_date: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>>;

    /// The row for the greatest `tran_date <= as_of` (spec.md §4.4).
    async fn latest_account_row(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>>;

    async fn upsert_account_row(&self, row: AccountBalanceModel) -> LedgerResult<AccountBalanceModel>;

    async fn find_gl_row(&self, gl_num: &str, tran_date: NaiveDate) -> LedgerResult<Option<GlBalanceModel>>;

    async fn latest_gl_row(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceModel>>;

    async fn upsert_gl_row(&self, row: GlBalanceModel) -> LedgerResult<GlBalanceModel>;

    /// Every GL that has at least one movement on `tran_date`, used by
    /// EOD Job 5 to enumerate which GL rows to (re)compute.
    async fn distinct_gl_nums_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<String>>;

    async fn upsert_accrual_row(&self, row: AccountBalanceAccrualModel) -> LedgerResult<AccountBalanceAccrualModel>;
}
