use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::balance::{AccountBalanceRow, GlBalanceRow};
use ledger_api::error::LedgerResult;
use ledger_api::service::account_registry_service::AccountRegistryService;
use ledger_api::service::balance_service::{BalanceQueryService, BalanceStoreService};
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_db::repository::{AccountRepository, BalanceRepository, TransactionRepository};
use rust_decimal::Decimal;
use tracing::debug;

use crate::decimal::round_half_up_2;

/// C4 (spec.md §4.4). Stores DR/CR as non-negative magnitudes and exposes
/// `closing_bal = opening_bal + cr - dr`; callers interpret the sign via the
/// owning GL's class.
pub struct BalanceServiceImpl {
    balance_repository: Arc<dyn BalanceRepository>,
    clock: Arc<dyn SystemClockService>,
}

impl BalanceServiceImpl {
    pub fn new(balance_repository: Arc<dyn BalanceRepository>, clock: Arc<dyn SystemClockService>) -> Self {
        Self { balance_repository, clock }
    }
}

#[async_trait]
impl BalanceStoreService for BalanceServiceImpl {
    async fn latest_by_account(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceRow>> {
        Ok(self.balance_repository.latest_account_row(account_no, as_of).await?.map(AccountBalanceRow::from))
    }

    async fn today_row(&self, account_no: &str) -> LedgerResult<AccountBalanceRow> {
        let today = self.clock.now().await?;
        if let Some(row) = self.balance_repository.find_account_row(account_no, today).await? {
            return Ok(row.into());
        }
        let opening = match self.balance_repository.latest_account_row(account_no, today).await? {
            Some(prev) => prev.closing_bal,
            None => Decimal::ZERO,
        };
        let now = self.clock.now_timestamp().await?;
        let row = AccountBalanceRow::new_zero(account_no, today, opening, now);
        let stored = self.balance_repository.upsert_account_row(row.into()).await?;
        Ok(stored.into())
    }

    async fn update_for_posting(&self, account_no: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<AccountBalanceRow> {
        let mut row = self.today_row(account_no).await?;
        match flag {
            DrCrFlag::D => row.dr_summation += amount,
            DrCrFlag::C => row.cr_summation += amount,
        }
        row.recompute_closing();
        row.current_balance = row.closing_bal;
        row.available_balance = row.closing_bal;
        row.last_updated = self.clock.now_timestamp().await?;
        debug!(account_no, flag = flag_label(flag), %amount, closing_bal = %row.closing_bal, "account balance updated");
        let stored = self.balance_repository.upsert_account_row(row.into()).await?;
        Ok(stored.into())
    }

    async fn latest_by_gl(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceRow>> {
        Ok(self.balance_repository.latest_gl_row(gl_num, as_of).await?.map(GlBalanceRow::from))
    }

    async fn today_gl_row(&self, gl_num: &str) -> LedgerResult<GlBalanceRow> {
        let today = self.clock.now().await?;
        if let Some(row) = self.balance_repository.find_gl_row(gl_num, today).await? {
            return Ok(row.into());
        }
        let opening = match self.balance_repository.latest_gl_row(gl_num, today).await? {
            Some(prev) => prev.closing_bal,
            None => Decimal::ZERO,
        };
        let now = self.clock.now_timestamp().await?;
        let row = GlBalanceRow::new_zero(gl_num, today, opening, now);
        let stored = self.balance_repository.upsert_gl_row(row.into()).await?;
        Ok(stored.into())
    }

    async fn update_gl_for_posting(&self, gl_num: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<GlBalanceRow> {
        let mut row = self.today_gl_row(gl_num).await?;
        match flag {
            DrCrFlag::D => row.dr_summation += amount,
            DrCrFlag::C => row.cr_summation += amount,
        }
        row.recompute_closing();
        row.last_updated = self.clock.now_timestamp().await?;
        let stored = self.balance_repository.upsert_gl_row(row.into()).await?;
        Ok(stored.into())
    }
}

fn flag_label(flag: DrCrFlag) -> &'static str {
    flag.as_str()
}

/// C7 (spec.md §4.7). Computes the real-time available balance on demand;
/// never caches it, since every posting changes the answer.
pub struct BalanceQueryServiceImpl {
    balance_repository: Arc<dyn BalanceRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    account_repository: Arc<dyn AccountRepository>,
    account_registry: Arc<dyn AccountRegistryService>,
    clock: Arc<dyn SystemClockService>,
}

impl BalanceQueryServiceImpl {
    pub fn new(
        balance_repository: Arc<dyn BalanceRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
        account_repository: Arc<dyn AccountRepository>,
        account_registry: Arc<dyn AccountRegistryService>,
        clock: Arc<dyn SystemClockService>,
    ) -> Self {
        Self { balance_repository, transaction_repository, account_repository, account_registry, clock }
    }
}

#[async_trait]
impl BalanceQueryService for BalanceQueryServiceImpl {
    async fn previous_closing_balance(&self, account_no: &str, system_date: NaiveDate) -> LedgerResult<Decimal> {
        // Tier 1: the row at system_date - 1.
        if let Some(row) = self.balance_repository.find_account_row(account_no, system_date.pred_opt().expect("date underflow")).await? {
            return Ok(row.closing_bal);
        }
        // Tier 2: the latest row strictly before system_date.
        if let Some(row) = self
            .balance_repository
            .latest_account_row(account_no, system_date.pred_opt().expect("date underflow"))
            .await?
        {
            return Ok(row.closing_bal);
        }
        // Tier 3: brand-new account.
        Ok(Decimal::ZERO)
    }

    async fn available_balance(&self, account_no: &str) -> LedgerResult<Decimal> {
        let system_date = self.clock.now().await?;
        let opening = self.previous_closing_balance(account_no, system_date).await?;
        let today_d = self.transaction_repository.sum_today(account_no, system_date, DrCrFlag::D).await?;
        let today_c = self.transaction_repository.sum_today(account_no, system_date, DrCrFlag::C).await?;
        let computed = opening + today_c - today_d;

        let info = self.account_registry.resolve(account_no).await?;
        let loan_limit = if info.is_asset_gl() {
            self.account_repository
                .find_by_account_no(account_no)
                .await?
                .map(|m| m.loan_limit)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Ok(round_half_up_2(computed + loan_limit))
    }
}

