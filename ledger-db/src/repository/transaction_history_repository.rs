use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;

use crate::models::transaction::TxnHistModel;

#[async_trait]
pub trait TransactionHistoryRepository: Send + Sync {
    async fn insert(&self, row: TxnHistModel) -> LedgerResult<()>;

    async fn find_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TxnHistModel>>;
}
