use std::sync::Arc;

use async_trait::async_trait;
use ledger_api::domain::gl::{classify_gl_num, GlClass, GlSetup};
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::chart_of_accounts_service::ChartOfAccountsService;
use ledger_db::repository::GlRepository;

/// C2 (spec.md §4.2). Read-only over the chart of accounts; classification
/// itself is the pure `classify_gl_num` function, the repository only
/// materializes the relational closure ("active GLs", "balance-sheet GLs").
pub struct ChartOfAccountsServiceImpl {
    gl_repository: Arc<dyn GlRepository>,
}

impl ChartOfAccountsServiceImpl {
    pub fn new(gl_repository: Arc<dyn GlRepository>) -> Self {
        Self { gl_repository }
    }
}

#[async_trait]
impl ChartOfAccountsService for ChartOfAccountsServiceImpl {
    async fn leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        let gl = self.gl_repository.find_by_num(gl_num).await?.ok_or_else(|| LedgerError::GlNotFound(gl_num.to_string()))?;
        Ok(gl.layer_id == 4)
    }

    async fn classify(&self, gl_num: &str) -> LedgerResult<GlClass> {
        classify_gl_num(gl_num).ok_or_else(|| LedgerError::GlNotFound(gl_num.to_string()))
    }

    async fn is_overdraft_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(self.gl_repository.find_by_num(gl_num).await?.map(|gl| gl.is_overdraft).unwrap_or(false))
    }

    async fn is_interest_income_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(matches!(self.classify(gl_num).await?, GlClass::InterestIncome))
    }

    async fn is_interest_payable_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(matches!(self.classify(gl_num).await?, GlClass::InterestPayable))
    }

    async fn active_gls(&self) -> LedgerResult<Vec<GlSetup>> {
        Ok(self.gl_repository.find_active().await?.into_iter().map(GlSetup::from).collect())
    }

    async fn balance_sheet_gls(&self) -> LedgerResult<Vec<GlSetup>> {
        let active = self.gl_repository.find_active().await?;
        Ok(active
            .into_iter()
            .filter(|gl| {
                gl.gl_num.starts_with('1') || gl.gl_num.starts_with('2') || classify_gl_num(&gl.gl_num).is_some()
            })
            .map(GlSetup::from)
            .collect())
    }

    async fn get(&self, gl_num: &str) -> LedgerResult<GlSetup> {
        self.gl_repository
            .find_by_num(gl_num)
            .await?
            .map(GlSetup::from)
            .ok_or_else(|| LedgerError::GlNotFound(gl_num.to_string()))
    }
}
