use async_trait::async_trait;
use ledger_api::error::LedgerResult;

use crate::models::account::{AccountModel, AccountSeqModel, InterestRateModel, SubProductModel};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_account_no(&self, account_no: &str) -> LedgerResult<Option<AccountModel>>;

    async fn exists(&self, account_no: &str) -> LedgerResult<bool>;

    async fn insert(&self, account: AccountModel) -> LedgerResult<AccountModel>;

    async fn update_status(&self, account_no: &str, status: &str) -> LedgerResult<()>;

    /// All Active accounts, used by EOD Job 1 and interest accrual.
    async fn find_active(&self) -> LedgerResult<Vec<AccountModel>>;

    /// Active customer accounts whose owning GL starts with `1` or `2`
    /// (spec.md §4.8 interest-accrual eligibility).
    async fn find_interest_eligible(&self) -> LedgerResult<Vec<AccountModel>>;

    async fn find_sub_product(&self, sub_product_code: &str) -> LedgerResult<Option<SubProductModel>>;

    /// Latest rate for `interest_code` with `effective_date <= as_of`
    /// (spec.md §4.8 step 2).
    async fn latest_interest_rate(&self, interest_code: &str, as_of: chrono::NaiveDate) -> LedgerResult<Option<InterestRateModel>>;
}

/// `Account_Seq` operations (spec.md §3/§5): single-writer per-GL counter
/// used to mint office account numbers, capped at 99 (spec.md §3).
#[async_trait]
pub trait AccountSeqRepository: Send + Sync {
    async fn next(&self, gl_num: &str) -> LedgerResult<i32>;

    async fn peek(&self, gl_num: &str) -> LedgerResult<AccountSeqModel>;
}
