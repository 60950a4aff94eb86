use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::eod::{EodJob, EodJobOutcome, EodJobStatus, EodLogEntry, EodRunSummary, SystemParameters};
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::balance_service::BalanceStoreService;
use ledger_api::service::eod_service::EodService;
use ledger_api::service::interest_accrual_service::InterestAccrualService;
use ledger_api::service::reports_service::ReportsService;
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_db::models::balance::AccountBalanceAccrualModel;
use ledger_db::models::eod::EodLogModel;
use ledger_db::repository::{AccountRepository, BalanceRepository, EodLogRepository, InterestAccrualRepository, ParameterRepository, TransactionRepository};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

/// C9 (spec.md §4.9). Each job writes its start row and completion row in
/// separately committed units (spec.md §3 "EOD Log"); the log therefore
/// survives rollback of the job's own ledger-mutating work.
pub struct EodServiceImpl {
    account_repository: Arc<dyn AccountRepository>,
    balance_repository: Arc<dyn BalanceRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    interest_accrual_repository: Arc<dyn InterestAccrualRepository>,
    eod_log_repository: Arc<dyn EodLogRepository>,
    parameter_repository: Arc<dyn ParameterRepository>,
    balance_store: Arc<dyn BalanceStoreService>,
    interest_accrual_service: Arc<dyn InterestAccrualService>,
    reports_service: Arc<dyn ReportsService>,
    clock: Arc<dyn SystemClockService>,
}

impl EodServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        balance_repository: Arc<dyn BalanceRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
        interest_accrual_repository: Arc<dyn InterestAccrualRepository>,
        eod_log_repository: Arc<dyn EodLogRepository>,
        parameter_repository: Arc<dyn ParameterRepository>,
        balance_store: Arc<dyn BalanceStoreService>,
        interest_accrual_service: Arc<dyn InterestAccrualService>,
        reports_service: Arc<dyn ReportsService>,
        clock: Arc<dyn SystemClockService>,
    ) -> Self {
        Self {
            account_repository,
            balance_repository,
            transaction_repository,
            interest_accrual_repository,
            eod_log_repository,
            parameter_repository,
            balance_store,
            interest_accrual_service,
            reports_service,
            clock,
        }
    }

    async fn gate(&self, eod_date: chrono::NaiveDate, job: EodJob) -> LedgerResult<()> {
        if let Some(existing) = self.eod_log_repository.latest(eod_date, job.name()).await? {
            if existing.status == "Success" {
                return Err(LedgerError::AlreadyExecuted { job_name: job.name().to_string(), eod_date });
            }
        }
        if let Some(predecessor) = job.predecessor() {
            let done = self
                .eod_log_repository
                .latest(eod_date, predecessor.name())
                .await?
                .map(|e| e.status == "Success")
                .unwrap_or(false);
            if !done {
                return Err(LedgerError::PriorJobNotCompleted {
                    job_name: job.name().to_string(),
                    required_job: predecessor.name().to_string(),
                });
            }
        }
        Ok(())
    }

    async fn log_start(&self, eod_date: chrono::NaiveDate, job: EodJob) -> LedgerResult<chrono::DateTime<Utc>> {
        let start = self.clock.now_timestamp().await?;
        self.eod_log_repository
            .insert_start(EodLogModel::from(EodLogEntry {
                eod_date,
                job_name: job.name().to_string(),
                start_timestamp: start,
                end_timestamp: None,
                records_processed: 0,
                status: EodJobStatus::Running,
                error_message: None,
                failed_at_step: None,
            }))
            .await?;
        Ok(start)
    }

    async fn log_complete(
        &self,
        eod_date: chrono::NaiveDate,
        job: EodJob,
        start: chrono::DateTime<Utc>,
        result: &LedgerResult<i64>,
    ) -> LedgerResult<()> {
        let (status, records, error) = match result {
            Ok(n) => ("Success", *n, None),
            Err(e) => ("Failed", 0, Some(e.to_string())),
        };
        let end = self.clock.now_timestamp().await?;
        self.eod_log_repository
            .complete(eod_date, job.name(), start, end, records, status, error, None)
            .await
    }

    /// EOD Job 1 — Account Balance Update.
    async fn job_account_balance_update(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        let accounts = self.account_repository.find_active().await?;
        let mut processed = 0i64;
        for account in &accounts {
            let opening = self
                .balance_repository
                .latest_account_row(&account.account_no, eod_date.pred_opt().expect("date underflow"))
                .await?
                .map(|r| r.closing_bal)
                .unwrap_or(Decimal::ZERO);

            let mut row =
                ledger_api::domain::balance::AccountBalanceRow::new_zero(&account.account_no, eod_date, opening, self.clock.now_timestamp().await?);
            row.dr_summation = self.transaction_repository.sum_today(&account.account_no, eod_date, DrCrFlag::D).await?;
            row.cr_summation = self.transaction_repository.sum_today(&account.account_no, eod_date, DrCrFlag::C).await?;
            row.recompute_closing();
            row.current_balance = row.closing_bal;
            row.available_balance = row.closing_bal;
            self.balance_repository.upsert_account_row(row.into()).await?;
            processed += 1;
        }
        Ok(processed)
    }

    /// EOD Job 2 — Interest Accrual Transactions.
    async fn job_interest_accrual_transactions(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        self.interest_accrual_repository.delete_for_date(eod_date).await?;
        let report = self.interest_accrual_service.accrue_all(eod_date).await?;
        if !report.errors.is_empty() {
            warn!(eod_date = %eod_date, error_count = report.errors.len(), "interest accrual produced per-account errors");
        }
        Ok(report.accounts_processed)
    }

    /// EOD Job 3 — Interest Accrual GL Movements: one GL-movement row per
    /// Pending leg, flipping each to Processed.
    async fn job_interest_accrual_gl_movements(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        let pending = self.interest_accrual_repository.find_pending(eod_date).await?;
        let mut processed = 0i64;
        for leg in &pending {
            let gl_row = self
                .balance_repository
                .find_gl_row(&leg.gl_num, eod_date)
                .await?
                .map(|m| m.closing_bal)
                .unwrap_or(Decimal::ZERO);
            self.transaction_repository
                .insert_gl_movement(ledger_db::models::transaction::GlMovementModel {
                    tran_id: leg.accr_tran_id.clone(),
                    gl_num: leg.gl_num.clone(),
                    dr_cr_flag: leg.dr_cr_flag.clone(),
                    tran_date: eod_date,
                    value_date: eod_date,
                    amount: leg.amount,
                    balance_after: gl_row,
                    is_accrual: true,
                })
                .await?;
            self.interest_accrual_repository.mark_processed(&leg.accr_tran_id).await?;
            processed += 1;
        }
        Ok(processed)
    }

    /// EOD Job 4 — GL Movement Update: consolidation is a read-through in
    /// this design (movements are already a single append-only stream), so
    /// the job's job is to count the unified set for the day.
    async fn job_gl_movement_update(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        let movements = self.transaction_repository.find_gl_movements_on(eod_date).await?;
        Ok(movements.len() as i64)
    }

    /// EOD Job 5 — GL Balance Update: one row per distinct `gl_num` moved
    /// on `eod_date`, with the DR=CR cross-check invariant (spec.md §4.9).
    async fn job_gl_balance_update(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        let gl_nums = self.balance_repository.distinct_gl_nums_on(eod_date).await?;
        let movements = self.transaction_repository.find_gl_movements_on(eod_date).await?;

        let mut total_dr = Decimal::ZERO;
        let mut total_cr = Decimal::ZERO;
        let mut processed = 0i64;

        for gl_num in &gl_nums {
            let opening = self
                .balance_repository
                .latest_gl_row(gl_num, eod_date.pred_opt().expect("date underflow"))
                .await?
                .map(|r| r.closing_bal)
                .unwrap_or(Decimal::ZERO);

            let mut row = ledger_api::domain::balance::GlBalanceRow::new_zero(gl_num.clone(), eod_date, opening, self.clock.now_timestamp().await?);
            for movement in movements.iter().filter(|m| &m.gl_num == gl_num) {
                if movement.dr_cr_flag == DrCrFlag::D.as_str() {
                    row.dr_summation += movement.amount;
                } else {
                    row.cr_summation += movement.amount;
                }
            }
            row.recompute_closing();
            total_dr += row.dr_summation;
            total_cr += row.cr_summation;
            self.balance_repository.upsert_gl_row(row.into()).await?;
            processed += 1;
        }

        if total_dr != total_cr {
            error!(eod_date = %eod_date, %total_dr, %total_cr, "GL cross-check failed");
            return Err(LedgerError::GlCrossCheckFailed { gl_num: "ALL".to_string(), tran_date: eod_date });
        }
        Ok(processed)
    }

    /// EOD Job 6 — Interest-Accrual Account Balance: per-account accrual
    /// snapshot from the Processed legs of Jobs 2/3.
    async fn job_interest_accrual_account_balance(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        let pending = self.interest_accrual_repository.find_pending(eod_date).await?;
        use std::collections::HashMap;
        let mut by_account: HashMap<String, (Decimal, Decimal)> = HashMap::new();
        for leg in &pending {
            let entry = by_account.entry(leg.account_no.clone()).or_insert((Decimal::ZERO, Decimal::ZERO));
            match leg.dr_cr_flag.as_str() {
                "D" => entry.0 += leg.amount,
                _ => entry.1 += leg.amount,
            }
        }
        let processed = by_account.len() as i64;
        for (account_no, (dr, cr)) in by_account {
            let last_updated = self.clock.now_timestamp().await?;
            self.balance_repository
                .upsert_accrual_row(AccountBalanceAccrualModel { account_no, tran_date: eod_date, accrued_dr: dr, accrued_cr: cr, last_updated })
                .await?;
        }
        Ok(processed)
    }

    /// EOD Job 7 — Financial Reports.
    async fn job_financial_reports(&self, eod_date: chrono::NaiveDate) -> LedgerResult<i64> {
        self.reports_service.write_reports(eod_date).await?;
        Ok(1)
    }

    /// EOD Job 8 — System Date Increment.
    async fn job_system_date_increment(&self, eod_date: chrono::NaiveDate, user_id: &str) -> LedgerResult<i64> {
        let next = eod_date.succ_opt().expect("date overflow");
        self.clock.set(next, user_id).await?;
        Ok(1)
    }

    async fn run_job_body(&self, job: EodJob, eod_date: chrono::NaiveDate, user_id: &str) -> LedgerResult<i64> {
        match job {
            EodJob::AccountBalanceUpdate => self.job_account_balance_update(eod_date).await,
            EodJob::InterestAccrualTransactions => self.job_interest_accrual_transactions(eod_date).await,
            EodJob::InterestAccrualGlMovements => self.job_interest_accrual_gl_movements(eod_date).await,
            EodJob::GlMovementUpdate => self.job_gl_movement_update(eod_date).await,
            EodJob::GlBalanceUpdate => self.job_gl_balance_update(eod_date).await,
            EodJob::InterestAccrualAccountBalance => self.job_interest_accrual_account_balance(eod_date).await,
            EodJob::FinancialReports => self.job_financial_reports(eod_date).await,
            EodJob::SystemDateIncrement => self.job_system_date_increment(eod_date, user_id).await,
        }
    }
}

#[async_trait]
impl EodService for EodServiceImpl {
    async fn run_job(&self, job: EodJob, user_id: &str) -> LedgerResult<EodJobOutcome> {
        let eod_date = self.clock.now().await?;
        self.gate(eod_date, job).await?;

        let start = self.log_start(eod_date, job).await?;
        let result = self.run_job_body(job, eod_date, user_id).await;
        self.log_complete(eod_date, job, start, &result).await?;

        match result {
            Ok(records_processed) => {
                info!(job = job.name(), eod_date = %eod_date, records_processed, "EOD job succeeded");
                Ok(EodJobOutcome { job, status: EodJobStatus::Success, records_processed, error_message: None })
            }
            Err(e) => {
                error!(job = job.name(), eod_date = %eod_date, error = %e, "EOD job failed");
                Ok(EodJobOutcome { job, status: EodJobStatus::Failed, records_processed: 0, error_message: Some(e.to_string()) })
            }
        }
    }

    async fn run_all(&self, user_id: &str) -> LedgerResult<EodRunSummary> {
        let eod_date = self.clock.now().await?;
        let mut outcomes = Vec::with_capacity(EodJob::ORDER.len());

        for job in EodJob::ORDER {
            let outcome = self.run_job(job, user_id).await?;
            let failed = outcome.status == EodJobStatus::Failed;
            outcomes.push(outcome);
            if failed {
                break;
            }
        }

        let new_system_date = if outcomes.last().map(|o| o.status) == Some(EodJobStatus::Success) {
            self.clock.now().await.ok()
        } else {
            None
        };

        Ok(EodRunSummary { eod_date, jobs: outcomes, new_system_date })
    }

    async fn status(&self) -> LedgerResult<SystemParameters> {
        match self.parameter_repository.get().await? {
            Some(params) => Ok(params.into()),
            None => {
                let date = self.clock.now().await?;
                Ok(SystemParameters { system_date: date, last_eod_date: None, last_eod_timestamp: None, last_eod_user: None })
            }
        }
    }
}
