use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ledger_api::domain::account::AccountInfo;
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::account_registry_service::AccountRegistryService;
use ledger_db::repository::AccountRepository;
use moka::future::Cache;
use tracing::debug;

/// C3 (spec.md §4.3). `resolve` is cached; the cache is invalidated
/// explicitly by any call path that opens an account or changes its status
/// (`invalidate`), never by time-to-live alone, since a stale `Active` entry
/// after closure would let a debit slip past validation.
pub struct AccountRegistryServiceImpl {
    account_repository: Arc<dyn AccountRepository>,
    cache: Cache<String, AccountInfo>,
}

impl AccountRegistryServiceImpl {
    pub fn new(account_repository: Arc<dyn AccountRepository>) -> Self {
        let cache = Cache::builder()
            .max_capacity(50_000)
            .time_to_live(Duration::from_secs(3600))
            .build();
        Self { account_repository, cache }
    }

    /// Drop a cached entry after an account open / status change.
    pub async fn invalidate(&self, account_no: &str) {
        self.cache.invalidate(account_no).await;
    }
}

#[async_trait]
impl AccountRegistryService for AccountRegistryServiceImpl {
    async fn resolve(&self, account_no: &str) -> LedgerResult<AccountInfo> {
        if let Some(info) = self.cache.get(account_no).await {
            debug!(account_no, "account registry cache hit");
            return Ok(info);
        }
        let model = self
            .account_repository
            .find_by_account_no(account_no)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_no.to_string()))?;
        let info = model.to_info();
        self.cache.insert(account_no.to_string(), info.clone()).await;
        Ok(info)
    }

    async fn exists(&self, account_no: &str) -> LedgerResult<bool> {
        if self.cache.get(account_no).await.is_some() {
            return Ok(true);
        }
        self.account_repository.exists(account_no).await
    }
}
