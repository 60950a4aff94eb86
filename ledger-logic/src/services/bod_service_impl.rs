use std::sync::Arc;

use async_trait::async_trait;
use ledger_api::domain::eod::BodSummary;
use ledger_api::domain::transaction::{GlMovement, TransactionLeg};
use ledger_api::error::LedgerResult;
use ledger_api::service::account_registry_service::AccountRegistryService;
use ledger_api::service::balance_service::{BalanceQueryService, BalanceStoreService};
use ledger_api::service::bod_service::BodService;
use ledger_api::service::chart_of_accounts_service::ChartOfAccountsService;
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_db::models::transaction::GlMovementModel;
use ledger_db::repository::TransactionRepository;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::validation::validate_leg;

/// C11 (spec.md §4.11). Each leg is promoted in its own unit of work, so a
/// mid-run failure rolls back only the current leg; legs already promoted
/// earlier in the run stay Posted.
pub struct BodServiceImpl {
    transaction_repository: Arc<dyn TransactionRepository>,
    account_registry: Arc<dyn AccountRegistryService>,
    balance_store: Arc<dyn BalanceStoreService>,
    balance_query: Arc<dyn BalanceQueryService>,
    chart_of_accounts: Arc<dyn ChartOfAccountsService>,
    clock: Arc<dyn SystemClockService>,
}

impl BodServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepository>,
        account_registry: Arc<dyn AccountRegistryService>,
        balance_store: Arc<dyn BalanceStoreService>,
        balance_query: Arc<dyn BalanceQueryService>,
        chart_of_accounts: Arc<dyn ChartOfAccountsService>,
        clock: Arc<dyn SystemClockService>,
    ) -> Self {
        Self { transaction_repository, account_registry, balance_store, balance_query, chart_of_accounts, clock }
    }

    /// Posting effects for one promoted leg, mirroring
    /// `TransactionServiceImpl::apply_posting`, including the full §4.5
    /// per-leg validation re-check — a Future leg's validity can have
    /// changed since it was created (spec.md §4.11).
    async fn promote_leg(&self, leg: &TransactionLeg) -> LedgerResult<()> {
        let info = self.account_registry.resolve(&leg.account_no).await?;
        let overdraft = self.chart_of_accounts.is_overdraft_leaf(&info.gl_num).await.unwrap_or(false);
        let available = self.balance_query.available_balance(&leg.account_no).await.unwrap_or(Decimal::ZERO);
        let today = self.balance_store.today_row(&leg.account_no).await?;
        validate_leg(&info, leg.dr_cr_flag, leg.lcy_amount, overdraft, available, today.current_balance)?;

        self.balance_store.update_for_posting(&leg.account_no, leg.dr_cr_flag, leg.lcy_amount).await?;
        let gl_row = self.balance_store.update_gl_for_posting(&info.gl_num, leg.dr_cr_flag, leg.lcy_amount).await?;
        self.transaction_repository
            .insert_gl_movement(GlMovementModel::from(GlMovement {
                tran_id: leg.tran_id.clone(),
                gl_num: info.gl_num,
                dr_cr_flag: leg.dr_cr_flag,
                tran_date: leg.tran_date,
                value_date: leg.value_date,
                amount: leg.lcy_amount,
                balance_after: gl_row.closing_bal,
                is_accrual: false,
            }))
            .await?;
        self.transaction_repository.update_leg_status(&leg.tran_id, "Posted").await?;
        Ok(())
    }
}

#[async_trait]
impl BodService for BodServiceImpl {
    async fn promote_future_dated(&self) -> LedgerResult<BodSummary> {
        let run_date = self.clock.now().await?;
        let due = self.transaction_repository.find_future_due(run_date).await?;
        let pending_before = due.len() as i64;

        let mut processed = 0i64;
        let mut errors = Vec::new();

        for model in due {
            let leg: TransactionLeg = model.into();
            match self.promote_leg(&leg).await {
                Ok(()) => {
                    processed += 1;
                }
                Err(err) => {
                    error!(tran_id = %leg.tran_id, error = %err, "failed to promote future-dated leg");
                    errors.push(format!("{}: {err}", leg.tran_id));
                }
            }
        }

        let pending_after = pending_before - processed;
        if errors.is_empty() {
            info!(run_date = %run_date, processed, "BOD promotion complete");
        } else {
            warn!(run_date = %run_date, processed, failures = errors.len(), "BOD promotion completed with failures");
        }

        Ok(BodSummary { run_date, pending_before, pending_after, processed, errors })
    }
}
