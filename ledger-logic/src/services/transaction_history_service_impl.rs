use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::transaction::TxnHistRow;
use ledger_api::error::LedgerResult;
use ledger_api::service::transaction_history_service::TransactionHistoryService;
use ledger_db::models::transaction::TxnHistModel;
use ledger_db::repository::TransactionHistoryRepository;

/// C6 (spec.md §4.5 "Verify"). Writes are append-only; history rows are
/// never updated or deleted once recorded.
pub struct TransactionHistoryServiceImpl {
    history_repository: Arc<dyn TransactionHistoryRepository>,
}

impl TransactionHistoryServiceImpl {
    pub fn new(history_repository: Arc<dyn TransactionHistoryRepository>) -> Self {
        Self { history_repository }
    }
}

#[async_trait]
impl TransactionHistoryService for TransactionHistoryServiceImpl {
    async fn record(&self, row: TxnHistRow) -> LedgerResult<()> {
        self.history_repository.insert(TxnHistModel::from(row)).await
    }

    async fn for_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TxnHistRow>> {
        Ok(self.history_repository.find_by_account(account_no, from, to).await?.into_iter().map(TxnHistRow::from).collect())
    }
}
