use async_trait::async_trait;

use crate::domain::transaction::{TransactionRequest, TransactionView};
use crate::error::LedgerResult;

/// C5 — the `Entry -> Posted -> Verified` state machine, with reversal
/// (spec.md §4.5). Every mutating operation here runs within a single
/// durable unit of work at REPEATABLE READ (spec.md §5).
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Create a multi-leg transaction in Entry state. Fails with
    /// `Unbalanced`, `AccountNotFound`, `InsufficientBalance`,
    /// `AccountInactive` per spec.md §4.5.
    async fn create_entry(&self, request: TransactionRequest) -> LedgerResult<TransactionView>;

    /// Post every leg of `base_tran_id`, atomically mutating balances and
    /// emitting GL movements. Fails with `NotEntry`, `Unbalanced`, or a
    /// per-leg validation error; any failing leg rolls back the whole call.
    async fn post(&self, base_tran_id: &str) -> LedgerResult<TransactionView>;

    /// Write a history row per leg. Idempotent — re-verifying an already
    /// Verified transaction reports `AlreadyVerified` rather than erroring
    /// the caller out of a consistent state.
    async fn verify(&self, base_tran_id: &str) -> LedgerResult<TransactionView>;

    /// Mint a new transaction with flipped `dr_cr_flag`s, equal amounts,
    /// `pointing_id` set to the original, Verified immediately.
    async fn reverse(&self, base_tran_id: &str, reason: &str) -> LedgerResult<TransactionView>;

    async fn find(&self, base_tran_id: &str) -> LedgerResult<TransactionView>;

    async fn list_by_account(&self, account_no: &str, from: chrono::NaiveDate, to: chrono::NaiveDate) -> LedgerResult<Vec<TransactionView>>;
}
