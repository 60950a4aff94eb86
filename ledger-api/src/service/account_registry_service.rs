use async_trait::async_trait;

use crate::domain::account::AccountInfo;
use crate::error::LedgerResult;

/// C3 — unified view over customer and office accounts (spec.md §4.3).
/// Implementations are expected to cache `resolve` results and invalidate
/// the cache on account open / status change.
#[async_trait]
pub trait AccountRegistryService: Send + Sync {
    async fn resolve(&self, account_no: &str) -> LedgerResult<AccountInfo>;

    async fn exists(&self, account_no: &str) -> LedgerResult<bool>;
}
