use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_db::repository::ParameterRepository;
use tracing::{debug, info};

use crate::LedgerConfig;

/// C1 (spec.md §4.1). `System_Date` is read/written through `Parameter_Table`
/// exclusively; no call path in this crate reads `Utc::now().date_naive()`
/// for a business date.
pub struct SystemClockServiceImpl {
    parameter_repository: Arc<dyn ParameterRepository>,
    config: LedgerConfig,
}

impl SystemClockServiceImpl {
    pub fn new(parameter_repository: Arc<dyn ParameterRepository>, config: LedgerConfig) -> Self {
        Self { parameter_repository, config }
    }
}

#[async_trait]
impl SystemClockService for SystemClockServiceImpl {
    async fn now(&self) -> LedgerResult<NaiveDate> {
        match self.parameter_repository.get().await? {
            Some(params) => Ok(params.system_date),
            None => self.config.default_system_date.ok_or(LedgerError::SystemDateNotConfigured),
        }
    }

    async fn now_timestamp(&self) -> LedgerResult<DateTime<Utc>> {
        let date = self.now().await?;
        let naive = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
    }

    async fn set(&self, date: NaiveDate, user_id: &str) -> LedgerResult<()> {
        debug!(%date, user_id, "setting System_Date");
        self.parameter_repository.set_system_date(date, user_id, Utc::now()).await?;
        info!(%date, user_id, "System_Date updated");
        Ok(())
    }
}
