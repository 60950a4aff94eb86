use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::transaction::TxnHistRow;
use crate::error::LedgerResult;

/// C6 — writes one immutable history row per leg on Verify, for later
/// statement rendering by the (out-of-scope) Statement-of-Accounts
/// generator (spec.md §4.5 "Verify").
#[async_trait]
pub trait TransactionHistoryService: Send + Sync {
    async fn record(&self, row: TxnHistRow) -> LedgerResult<()>;

    async fn for_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TxnHistRow>>;
}
