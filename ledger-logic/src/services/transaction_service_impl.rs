use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::transaction::{LegRequest, TransactionLeg, TransactionRequest, TransactionView, TranStatus};
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::account_registry_service::AccountRegistryService;
use ledger_api::service::balance_service::{BalanceQueryService, BalanceStoreService};
use ledger_api::service::chart_of_accounts_service::ChartOfAccountsService;
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_api::service::transaction_history_service::TransactionHistoryService;
use ledger_api::service::transaction_service::TransactionService;
use ledger_db::models::transaction::{GlMovementModel, TransactionLegModel};
use ledger_db::repository::{TransactionRepository, UnitOfWork, UnitOfWorkSession};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::decimal::round_half_up_2;
use crate::services::BalanceServiceImpl;
use crate::validation::validate_leg;

/// C5 (spec.md §4.5). Drives `Entry -> Posted -> Verified`, plus reversal by
/// minting an inverse transaction. `post` and `reverse` open a
/// `UnitOfWork` session so every leg's balance/GL/status mutation commits
/// or rolls back together (spec.md §4.5: "runs inside a single
/// transactional unit ... any leg failing ... rolls back all legs").
pub struct TransactionServiceImpl {
    transaction_repository: Arc<dyn TransactionRepository>,
    account_registry: Arc<dyn AccountRegistryService>,
    balance_store: Arc<dyn BalanceStoreService>,
    balance_query: Arc<dyn BalanceQueryService>,
    chart_of_accounts: Arc<dyn ChartOfAccountsService>,
    history: Arc<dyn TransactionHistoryService>,
    clock: Arc<dyn SystemClockService>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl TransactionServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepository>,
        account_registry: Arc<dyn AccountRegistryService>,
        balance_store: Arc<dyn BalanceStoreService>,
        balance_query: Arc<dyn BalanceQueryService>,
        chart_of_accounts: Arc<dyn ChartOfAccountsService>,
        history: Arc<dyn TransactionHistoryService>,
        clock: Arc<dyn SystemClockService>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            transaction_repository,
            account_registry,
            balance_store,
            balance_query,
            chart_of_accounts,
            history,
            clock,
            unit_of_work,
        }
    }

    /// `T<yyyymmdd><6-seq><3-rand>` (spec.md §4.5 "Create"). The sequence is
    /// the count of legs already created today plus one; the trailing 3
    /// random digits are the only collision guard under a date-only clock
    /// (spec.md §9) — a collision surfaces as a `Tran_Id` primary-key
    /// violation, which the caller sees as `Transient` and may retry.
    async fn generate_tran_id(&self, tran_date: NaiveDate) -> LedgerResult<String> {
        let count = self.transaction_repository.count_legs_on_date(tran_date).await?;
        let seq = (count + 1) % 1_000_000;
        let rand_suffix: u32 = rand::thread_rng().gen_range(0..1000);
        Ok(format!("T{}{:06}{:03}", tran_date.format("%Y%m%d"), seq, rand_suffix))
    }

    /// Validate the balanced-sum invariant at scale 2 (spec.md §4.5).
    fn check_balanced(legs: &[LegRequest]) -> LedgerResult<()> {
        let debit_total: Decimal = legs.iter().filter(|l| l.flag == DrCrFlag::D).map(|l| round_half_up_2(l.lcy_amount)).sum();
        let credit_total: Decimal = legs.iter().filter(|l| l.flag == DrCrFlag::C).map(|l| round_half_up_2(l.lcy_amount)).sum();
        if debit_total != credit_total {
            return Err(LedgerError::Unbalanced { debit_total, credit_total });
        }
        Ok(())
    }

    async fn hypothetical_validate(&self, account_no: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<()> {
        let info = self.account_registry.resolve(account_no).await?;
        let overdraft = self.chart_of_accounts.is_overdraft_leaf(&info.gl_num).await.unwrap_or(false);
        let available = self.balance_query.available_balance(account_no).await.unwrap_or(Decimal::ZERO);
        let today = self.balance_store.today_row(account_no).await?;
        validate_leg(&info, flag, amount, overdraft, available, today.current_balance)
    }

    async fn load_legs(&self, base_tran_id: &str) -> LedgerResult<Vec<TransactionLeg>> {
        let models = self.transaction_repository.find_legs_by_base(base_tran_id).await?;
        if models.is_empty() {
            return Err(LedgerError::TransactionNotFound(base_tran_id.to_string()));
        }
        Ok(models.into_iter().map(TransactionLeg::from).collect())
    }

    fn to_view(base_tran_id: &str, legs: Vec<TransactionLeg>) -> TransactionView {
        let first = legs.first().expect("legs are non-empty by construction");
        TransactionView {
            base_tran_id: base_tran_id.to_string(),
            status: first.tran_status,
            value_date: first.value_date,
            tran_date: first.tran_date,
            narration: first.narration.clone(),
            legs,
        }
    }

    /// Apply the posting effects of one leg: balance updates and the GL
    /// movement with its running `balance_after` (spec.md §4.5 "Post" /
    /// "Ordering and tie-breaks"). Takes the balance store and transaction
    /// repository explicitly so callers can pass either the shared
    /// singletons or ones scoped to a `UnitOfWorkSession`.
    async fn apply_posting(
        &self,
        balance_store: &dyn BalanceStoreService,
        transaction_repository: &dyn TransactionRepository,
        leg: &TransactionLeg,
    ) -> LedgerResult<()> {
        let info = self.account_registry.resolve(&leg.account_no).await?;
        balance_store.update_for_posting(&leg.account_no, leg.dr_cr_flag, leg.lcy_amount).await?;
        let gl_row = balance_store.update_gl_for_posting(&info.gl_num, leg.dr_cr_flag, leg.lcy_amount).await?;
        transaction_repository
            .insert_gl_movement(GlMovementModel {
                tran_id: leg.tran_id.clone(),
                gl_num: info.gl_num,
                dr_cr_flag: leg.dr_cr_flag.as_str().to_string(),
                tran_date: leg.tran_date,
                value_date: leg.value_date,
                amount: leg.lcy_amount,
                balance_after: gl_row.closing_bal,
                is_accrual: false,
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn create_entry(&self, request: TransactionRequest) -> LedgerResult<TransactionView> {
        if request.legs.len() < 2 {
            return Err(LedgerError::ValidationError {
                field: "legs".to_string(),
                message: "a transaction needs at least two legs".to_string(),
            });
        }
        for leg in &request.legs {
            if leg.lcy_amount <= Decimal::ZERO {
                return Err(LedgerError::ValidationError {
                    field: "lcy_amount".to_string(),
                    message: format!("leg on {} must be positive", leg.account_no),
                });
            }
        }
        Self::check_balanced(&request.legs)?;

        let tran_date = self.clock.now().await?;

        for leg in &request.legs {
            let info = self.account_registry.resolve(&leg.account_no).await?;
            if !info.status.is_transactable() {
                return Err(LedgerError::AccountInactive {
                    account_no: leg.account_no.clone(),
                    status: format!("{:?}", info.status),
                });
            }
            if request.value_date == tran_date {
                self.hypothetical_validate(&leg.account_no, leg.flag, leg.lcy_amount).await?;
            }
        }

        let base_tran_id = self.generate_tran_id(tran_date).await?;
        let now = self.clock.now_timestamp().await?;
        let status = if request.value_date > tran_date { TranStatus::Future } else { TranStatus::Entry };

        let legs: Vec<TransactionLeg> = request
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| TransactionLeg {
                tran_id: format!("{base_tran_id}-{}", idx + 1),
                line_no: (idx + 1) as u16,
                tran_date,
                value_date: request.value_date,
                account_no: leg.account_no.clone(),
                dr_cr_flag: leg.flag,
                currency: leg.currency.clone(),
                fcy_amount: leg.fcy_amount,
                exchange_rate: leg.exchange_rate,
                lcy_amount: round_half_up_2(leg.lcy_amount),
                narration: if leg.narration.is_empty() { request.narration.clone() } else { leg.narration.clone() },
                tran_status: status,
                pointing_id: None,
                created_at: now,
            })
            .collect();

        let models: Vec<TransactionLegModel> = legs.clone().into_iter().map(TransactionLegModel::from).collect();
        self.transaction_repository.insert_legs(models).await?;
        info!(base_tran_id = %base_tran_id, leg_count = legs.len(), "transaction entry created");
        Ok(Self::to_view(&base_tran_id, legs))
    }

    async fn post(&self, base_tran_id: &str) -> LedgerResult<TransactionView> {
        let legs = self.load_legs(base_tran_id).await?;
        if !legs.iter().all(|l| l.tran_status == TranStatus::Entry) {
            return Err(LedgerError::NotEntry(base_tran_id.to_string()));
        }

        let requests: Vec<LegRequest> = legs
            .iter()
            .map(|l| LegRequest {
                account_no: l.account_no.clone(),
                flag: l.dr_cr_flag,
                currency: l.currency.clone(),
                fcy_amount: l.fcy_amount,
                exchange_rate: l.exchange_rate,
                lcy_amount: l.lcy_amount,
                narration: l.narration.clone(),
            })
            .collect();
        Self::check_balanced(&requests)?;

        for leg in &legs {
            self.hypothetical_validate(&leg.account_no, leg.dr_cr_flag, leg.lcy_amount).await?;
        }

        let session = self.unit_of_work.begin().await?;
        let scoped_balances = BalanceServiceImpl::new(session.balances(), self.clock.clone());
        let scoped_transactions = session.transactions();
        for leg in &legs {
            if let Err(err) = self.apply_posting(&scoped_balances, scoped_transactions.as_ref(), leg).await {
                session.rollback().await?;
                return Err(err);
            }
            if let Err(err) = scoped_transactions.update_leg_status(&leg.tran_id, "Posted").await {
                session.rollback().await?;
                return Err(err);
            }
            debug!(tran_id = %leg.tran_id, "leg posted");
        }
        session.commit().await?;

        let posted = self.load_legs(base_tran_id).await?;
        info!(base_tran_id = %base_tran_id, "transaction posted");
        Ok(Self::to_view(base_tran_id, posted))
    }

    async fn verify(&self, base_tran_id: &str) -> LedgerResult<TransactionView> {
        let legs = self.load_legs(base_tran_id).await?;
        if legs.iter().all(|l| l.tran_status == TranStatus::Verified) {
            return Err(LedgerError::AlreadyVerified(base_tran_id.to_string()));
        }

        for leg in &legs {
            self.transaction_repository.update_leg_status(&leg.tran_id, "Verified").await?;
            let balance = self.balance_store.today_row(&leg.account_no).await?;
            self.history
                .record(ledger_api::domain::transaction::TxnHistRow {
                    tran_id: leg.tran_id.clone(),
                    account_no: leg.account_no.clone(),
                    tran_date: leg.tran_date,
                    value_date: leg.value_date,
                    dr_cr_flag: leg.dr_cr_flag,
                    lcy_amount: leg.lcy_amount,
                    balance_after: balance.closing_bal,
                    narration: leg.narration.clone(),
                    created_at: leg.created_at,
                })
                .await?;
        }

        let verified = self.load_legs(base_tran_id).await?;
        info!(base_tran_id = %base_tran_id, "transaction verified");
        Ok(Self::to_view(base_tran_id, verified))
    }

    async fn reverse(&self, base_tran_id: &str, reason: &str) -> LedgerResult<TransactionView> {
        let original = self.load_legs(base_tran_id).await?;
        if original.is_empty() {
            return Err(LedgerError::OriginalNotFound(base_tran_id.to_string()));
        }

        let tran_date = self.clock.now().await?;
        let new_base = self.generate_tran_id(tran_date).await?;
        let now = self.clock.now_timestamp().await?;
        let narration = format!("REVERSAL of {base_tran_id}: {reason}");

        let mut reversed_legs = Vec::with_capacity(original.len());
        for (idx, leg) in original.iter().enumerate() {
            let reversed = TransactionLeg {
                tran_id: format!("{new_base}-{}", idx + 1),
                line_no: (idx + 1) as u16,
                tran_date,
                value_date: tran_date,
                account_no: leg.account_no.clone(),
                dr_cr_flag: leg.dr_cr_flag.flip(),
                currency: leg.currency.clone(),
                fcy_amount: leg.fcy_amount,
                exchange_rate: leg.exchange_rate,
                lcy_amount: leg.lcy_amount,
                narration: narration.clone(),
                tran_status: TranStatus::Verified,
                pointing_id: Some(base_tran_id.to_string()),
                created_at: now,
            };
            reversed_legs.push(reversed);
        }

        let session = self.unit_of_work.begin().await?;
        let scoped_balances = BalanceServiceImpl::new(session.balances(), self.clock.clone());
        let scoped_transactions = session.transactions();
        for leg in &reversed_legs {
            if let Err(err) = self.apply_posting(&scoped_balances, scoped_transactions.as_ref(), leg).await {
                session.rollback().await?;
                return Err(err);
            }
        }
        let models: Vec<TransactionLegModel> = reversed_legs.clone().into_iter().map(TransactionLegModel::from).collect();
        if let Err(err) = scoped_transactions.insert_legs(models).await {
            session.rollback().await?;
            return Err(err);
        }
        session.commit().await?;

        for leg in &reversed_legs {
            let balance = self.balance_store.today_row(&leg.account_no).await?;
            self.history
                .record(ledger_api::domain::transaction::TxnHistRow {
                    tran_id: leg.tran_id.clone(),
                    account_no: leg.account_no.clone(),
                    tran_date: leg.tran_date,
                    value_date: leg.value_date,
                    dr_cr_flag: leg.dr_cr_flag,
                    lcy_amount: leg.lcy_amount,
                    balance_after: balance.closing_bal,
                    narration: leg.narration.clone(),
                    created_at: leg.created_at,
                })
                .await?;
        }

        warn!(original = %base_tran_id, reversal = %new_base, reason, "transaction reversed");
        Ok(Self::to_view(&new_base, reversed_legs))
    }

    async fn find(&self, base_tran_id: &str) -> LedgerResult<TransactionView> {
        let legs = self.load_legs(base_tran_id).await?;
        Ok(Self::to_view(base_tran_id, legs))
    }

    async fn list_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TransactionView>> {
        let models = self.transaction_repository.find_legs_by_account(account_no, from, to).await?;
        let mut grouped: std::collections::BTreeMap<String, Vec<TransactionLeg>> = std::collections::BTreeMap::new();
        for model in models {
            let leg: TransactionLeg = model.into();
            grouped.entry(leg.base_tran_id().to_string()).or_default().push(leg);
        }
        Ok(grouped.into_iter().map(|(base, legs)| Self::to_view(&base, legs)).collect())
    }
}
