use std::sync::Arc;

use async_trait::async_trait;
use ledger_api::error::LedgerResult;

use crate::repository::{BalanceRepository, TransactionRepository};

/// Opens a single durable unit of work scoped to the two repositories a
/// Post/Reverse call mutates (spec.md §4.5: "runs inside a single
/// transactional unit ... any leg failing validation or balance update
/// aborts and rolls back all legs"). Narrower than the teacher's
/// workspace-wide `UnitOfWork`/`UnitOfWorkSession` (which spans all eight
/// repository traits) because nothing outside `TransactionRepository` and
/// `BalanceRepository` is mutated inside a posting/reversal run.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> LedgerResult<Box<dyn UnitOfWorkSession>>;
}

#[async_trait]
pub trait UnitOfWorkSession: Send + Sync {
    fn transactions(&self) -> Arc<dyn TransactionRepository>;
    fn balances(&self) -> Arc<dyn BalanceRepository>;

    async fn commit(self: Box<Self>) -> LedgerResult<()>;
    async fn rollback(self: Box<Self>) -> LedgerResult<()>;
}
