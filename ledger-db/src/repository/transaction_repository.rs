use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::error::LedgerResult;
use rust_decimal::Decimal;

use crate::models::transaction::{GlMovementModel, TransactionLegModel};

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn insert_legs(&self, legs: Vec<TransactionLegModel>) -> LedgerResult<()>;

    async fn find_legs_by_base(&self, base_tran_id: &str) -> LedgerResult<Vec<TransactionLegModel>>;

    async fn update_leg_status(&self, tran_id: &str, status: &str) -> LedgerResult<()>;

    async fn find_legs_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>>;

    /// Sum of `lcy_amount` for legs in Entry/Posted/Verified state on
    /// `(account_no, tran_date, flag)` — the today-debit/today-credit terms
    /// of spec.md §4.7.
    async fn sum_today(&self, account_no: &str, tran_date: NaiveDate, flag: DrCrFlag) -> LedgerResult<Decimal>;

    /// Count of legs already created for `tran_date`, used to derive the
    /// 6-digit sequence in `generate_tran_id` (spec.md §4.5).
    async fn count_legs_on_date(&self, tran_date: NaiveDate) -> LedgerResult<i64>;

    async fn find_future_due(&self, as_of: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>>;

    async fn insert_gl_movement(&self, movement: GlMovementModel) -> LedgerResult<()>;

    async fn find_gl_movements_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<GlMovementModel>>;
}
