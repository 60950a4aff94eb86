use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ledger_api::domain::account::{AccountInfo, DrCrFlag};
use ledger_api::domain::balance::{AccountBalanceRow, GlBalanceRow};
use ledger_api::domain::gl::{GlClass, GlSetup};
use ledger_api::domain::interest::AccrualReport;
use ledger_api::domain::reports::{BalanceSheetReport, TrialBalanceReport};
use ledger_api::domain::transaction::TxnHistRow;
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::account_registry_service::AccountRegistryService;
use ledger_api::service::balance_service::{BalanceQueryService, BalanceStoreService};
use ledger_api::service::chart_of_accounts_service::ChartOfAccountsService;
use ledger_api::service::interest_accrual_service::InterestAccrualService;
use ledger_api::service::reports_service::ReportsService;
use ledger_api::service::system_clock_service::SystemClockService;
use ledger_api::service::transaction_history_service::TransactionHistoryService;
use ledger_db::models::account::{AccountModel, InterestRateModel, SubProductModel};
use ledger_db::models::balance::{AccountBalanceAccrualModel, AccountBalanceModel, GlBalanceModel};
use ledger_db::models::eod::{EodLogModel, ParameterModel};
use ledger_db::models::interest::InterestAccrualLegModel;
use ledger_db::models::transaction::{GlMovementModel, TransactionLegModel};
use ledger_db::repository::{
    AccountRepository, BalanceRepository, EodLogRepository, InterestAccrualRepository, ParameterRepository, TransactionRepository, UnitOfWork,
    UnitOfWorkSession,
};
use rust_decimal::Decimal;

/// In-memory stand-in for the account directory, keyed by `account_no`.
#[derive(Default)]
pub struct MockAccountRegistry {
    accounts: Mutex<HashMap<String, AccountInfo>>,
}

impl MockAccountRegistry {
    pub fn with_account(self, info: AccountInfo) -> Self {
        self.accounts.lock().unwrap().insert(info.account_no.clone(), info);
        self
    }
}

#[async_trait]
impl AccountRegistryService for MockAccountRegistry {
    async fn resolve(&self, account_no: &str) -> LedgerResult<AccountInfo> {
        self.accounts.lock().unwrap().get(account_no).cloned().ok_or_else(|| LedgerError::AccountNotFound(account_no.to_string()))
    }

    async fn exists(&self, account_no: &str) -> LedgerResult<bool> {
        Ok(self.accounts.lock().unwrap().contains_key(account_no))
    }
}

/// In-memory balance store: one row per `(account_no, tran_date)` and
/// `(gl_num, tran_date)`, mirroring the "today row, mutate in place" model.
#[derive(Default)]
pub struct MockBalanceStore {
    accounts: Mutex<HashMap<String, AccountBalanceRow>>,
    gls: Mutex<HashMap<String, GlBalanceRow>>,
    accruals: Mutex<HashMap<String, AccountBalanceAccrualModel>>,
    today: NaiveDate,
}

impl MockBalanceStore {
    pub fn new(today: NaiveDate) -> Self {
        Self { accounts: Mutex::new(HashMap::new()), gls: Mutex::new(HashMap::new()), accruals: Mutex::new(HashMap::new()), today }
    }

    pub fn with_account_row(self, row: AccountBalanceRow) -> Self {
        self.accounts.lock().unwrap().insert(row.account_no.clone(), row);
        self
    }

    pub fn with_gl_row(self, row: GlBalanceRow) -> Self {
        self.gls.lock().unwrap().insert(row.gl_num.clone(), row);
        self
    }
}

fn now_stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[async_trait]
impl BalanceStoreService for MockBalanceStore {
    async fn latest_by_account(&self, account_no: &str, _as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceRow>> {
        Ok(self.accounts.lock().unwrap().get(account_no).cloned())
    }

    async fn today_row(&self, account_no: &str) -> LedgerResult<AccountBalanceRow> {
        let mut accounts = self.accounts.lock().unwrap();
        Ok(accounts.entry(account_no.to_string()).or_insert_with(|| AccountBalanceRow::new_zero(account_no, self.today, Decimal::ZERO, now_stamp())).clone())
    }

    async fn update_for_posting(&self, account_no: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<AccountBalanceRow> {
        let mut accounts = self.accounts.lock().unwrap();
        let row = accounts.entry(account_no.to_string()).or_insert_with(|| AccountBalanceRow::new_zero(account_no, self.today, Decimal::ZERO, now_stamp()));
        match flag {
            DrCrFlag::D => row.dr_summation += amount,
            DrCrFlag::C => row.cr_summation += amount,
        }
        row.recompute_closing();
        row.current_balance = row.closing_bal;
        row.available_balance = row.closing_bal;
        row.last_updated = now_stamp();
        Ok(row.clone())
    }

    async fn latest_by_gl(&self, gl_num: &str, _as_of: NaiveDate) -> LedgerResult<Option<GlBalanceRow>> {
        Ok(self.gls.lock().unwrap().get(gl_num).cloned())
    }

    async fn today_gl_row(&self, gl_num: &str) -> LedgerResult<GlBalanceRow> {
        let mut gls = self.gls.lock().unwrap();
        Ok(gls.entry(gl_num.to_string()).or_insert_with(|| GlBalanceRow::new_zero(gl_num, self.today, Decimal::ZERO, now_stamp())).clone())
    }

    async fn update_gl_for_posting(&self, gl_num: &str, flag: DrCrFlag, amount: Decimal) -> LedgerResult<GlBalanceRow> {
        let mut gls = self.gls.lock().unwrap();
        let row = gls.entry(gl_num.to_string()).or_insert_with(|| GlBalanceRow::new_zero(gl_num, self.today, Decimal::ZERO, now_stamp()));
        match flag {
            DrCrFlag::D => row.dr_summation += amount,
            DrCrFlag::C => row.cr_summation += amount,
        }
        row.recompute_closing();
        row.last_updated = now_stamp();
        Ok(row.clone())
    }
}

/// Lets the same in-memory rows back a `UnitOfWorkSession`'s
/// `BalanceRepository` (via a fresh `BalanceServiceImpl` wrapper), so a
/// test observes the same balances whether it reads through
/// `BalanceStoreService` or through a transaction-scoped session.
#[async_trait]
impl BalanceRepository for MockBalanceStore {
    async fn find_account_row(&self, account_no: &str, _tran_date: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        Ok(self.accounts.lock().unwrap().get(account_no).cloned().map(AccountBalanceModel::from))
    }

    async fn latest_account_row(&self, account_no: &str, _as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        Ok(self.accounts.lock().unwrap().get(account_no).cloned().map(AccountBalanceModel::from))
    }

    async fn upsert_account_row(&self, row: AccountBalanceModel) -> LedgerResult<AccountBalanceModel> {
        let row = AccountBalanceRow::from(row);
        self.accounts.lock().unwrap().insert(row.account_no.clone(), row.clone());
        Ok(row.into())
    }

    async fn find_gl_row(&self, gl_num: &str, _tran_date: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        Ok(self.gls.lock().unwrap().get(gl_num).cloned().map(GlBalanceModel::from))
    }

    async fn latest_gl_row(&self, gl_num: &str, _as_of: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        Ok(self.gls.lock().unwrap().get(gl_num).cloned().map(GlBalanceModel::from))
    }

    async fn upsert_gl_row(&self, row: GlBalanceModel) -> LedgerResult<GlBalanceModel> {
        let row = GlBalanceRow::from(row);
        self.gls.lock().unwrap().insert(row.gl_num.clone(), row.clone());
        Ok(row.into())
    }

    async fn distinct_gl_nums_on(&self, _tran_date: NaiveDate) -> LedgerResult<Vec<String>> {
        let mut nums: Vec<String> = self.gls.lock().unwrap().keys().cloned().collect();
        nums.sort();
        Ok(nums)
    }

    async fn upsert_accrual_row(&self, row: AccountBalanceAccrualModel) -> LedgerResult<AccountBalanceAccrualModel> {
        self.accruals.lock().unwrap().insert(row.account_no.clone(), row.clone());
        Ok(row)
    }
}

/// Real-time available-balance query over the same in-memory rows.
pub struct MockBalanceQuery {
    pub accounts: Mutex<HashMap<String, Decimal>>,
}

impl MockBalanceQuery {
    pub fn new() -> Self {
        Self { accounts: Mutex::new(HashMap::new()) }
    }

    pub fn with_available(self, account_no: &str, amount: Decimal) -> Self {
        self.accounts.lock().unwrap().insert(account_no.to_string(), amount);
        self
    }
}

#[async_trait]
impl BalanceQueryService for MockBalanceQuery {
    async fn available_balance(&self, account_no: &str) -> LedgerResult<Decimal> {
        Ok(self.accounts.lock().unwrap().get(account_no).copied().unwrap_or(Decimal::ZERO))
    }

    async fn previous_closing_balance(&self, _account_no: &str, _system_date: NaiveDate) -> LedgerResult<Decimal> {
        Ok(Decimal::ZERO)
    }
}

/// Chart of accounts over a small fixed GL set, enough to drive
/// classification and overdraft checks in tests.
#[derive(Default)]
pub struct MockChartOfAccounts {
    overdraft_leaves: Mutex<Vec<String>>,
    gls: Mutex<Vec<GlSetup>>,
}

impl MockChartOfAccounts {
    pub fn with_overdraft_leaf(self, gl_num: &str) -> Self {
        self.overdraft_leaves.lock().unwrap().push(gl_num.to_string());
        self
    }

    pub fn with_gl(self, gl: GlSetup) -> Self {
        self.gls.lock().unwrap().push(gl);
        self
    }
}

#[async_trait]
impl ChartOfAccountsService for MockChartOfAccounts {
    async fn leaf(&self, _gl_num: &str) -> LedgerResult<bool> {
        Ok(true)
    }

    async fn classify(&self, gl_num: &str) -> LedgerResult<GlClass> {
        ledger_api::domain::gl::classify_gl_num(gl_num).ok_or_else(|| LedgerError::GlNotFound(gl_num.to_string()))
    }

    async fn is_overdraft_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(self.overdraft_leaves.lock().unwrap().iter().any(|g| g == gl_num))
    }

    async fn is_interest_income_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(gl_num.starts_with("24"))
    }

    async fn is_interest_payable_leaf(&self, gl_num: &str) -> LedgerResult<bool> {
        Ok(gl_num.starts_with("13"))
    }

    async fn active_gls(&self) -> LedgerResult<Vec<GlSetup>> {
        Ok(self.gls.lock().unwrap().clone())
    }

    async fn balance_sheet_gls(&self) -> LedgerResult<Vec<GlSetup>> {
        Ok(self.gls.lock().unwrap().clone())
    }

    async fn get(&self, gl_num: &str) -> LedgerResult<GlSetup> {
        self.gls.lock().unwrap().iter().find(|g| g.gl_num == gl_num).cloned().ok_or_else(|| LedgerError::GlNotFound(gl_num.to_string()))
    }
}

/// Fixed `System_Date`, never advanced by a test unless explicitly set.
pub struct MockSystemClock {
    date: Mutex<NaiveDate>,
}

impl MockSystemClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date: Mutex::new(date) }
    }
}

#[async_trait]
impl SystemClockService for MockSystemClock {
    async fn now(&self) -> LedgerResult<NaiveDate> {
        Ok(*self.date.lock().unwrap())
    }

    async fn now_timestamp(&self) -> LedgerResult<DateTime<Utc>> {
        Ok(now_stamp())
    }

    async fn set(&self, date: NaiveDate, _user_id: &str) -> LedgerResult<()> {
        *self.date.lock().unwrap() = date;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTransactionHistory {
    pub rows: Mutex<Vec<TxnHistRow>>,
}

#[async_trait]
impl TransactionHistoryService for MockTransactionHistory {
    async fn record(&self, row: TxnHistRow) -> LedgerResult<()> {
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn for_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TxnHistRow>> {
        Ok(self.rows.lock().unwrap().iter().filter(|r| r.account_no == account_no && r.tran_date >= from && r.tran_date <= to).cloned().collect())
    }
}

/// In-memory stand-in for `tran_table` / `gl_movement`, keyed the same way
/// the Postgres implementation is.
#[derive(Default)]
pub struct MockTransactionRepository {
    pub legs: Mutex<Vec<TransactionLegModel>>,
    pub movements: Mutex<Vec<GlMovementModel>>,
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn insert_legs(&self, legs: Vec<TransactionLegModel>) -> LedgerResult<()> {
        self.legs.lock().unwrap().extend(legs);
        Ok(())
    }

    async fn find_legs_by_base(&self, base_tran_id: &str) -> LedgerResult<Vec<TransactionLegModel>> {
        let prefix = format!("{base_tran_id}-");
        let mut found: Vec<_> = self.legs.lock().unwrap().iter().filter(|l| l.tran_id.starts_with(&prefix)).cloned().collect();
        found.sort_by_key(|l| l.line_no);
        Ok(found)
    }

    async fn update_leg_status(&self, tran_id: &str, status: &str) -> LedgerResult<()> {
        let mut legs = self.legs.lock().unwrap();
        if let Some(leg) = legs.iter_mut().find(|l| l.tran_id == tran_id) {
            leg.tran_status = status.to_string();
        }
        Ok(())
    }

    async fn find_legs_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
        Ok(self.legs.lock().unwrap().iter().filter(|l| l.account_no == account_no && l.tran_date >= from && l.tran_date <= to).cloned().collect())
    }

    async fn sum_today(&self, account_no: &str, tran_date: NaiveDate, flag: DrCrFlag) -> LedgerResult<Decimal> {
        Ok(self
            .legs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.account_no == account_no && l.tran_date == tran_date && l.dr_cr_flag == flag.as_str())
            .map(|l| l.lcy_amount)
            .sum())
    }

    async fn count_legs_on_date(&self, tran_date: NaiveDate) -> LedgerResult<i64> {
        Ok(self.legs.lock().unwrap().iter().filter(|l| l.tran_date == tran_date).count() as i64)
    }

    async fn find_future_due(&self, as_of: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
        Ok(self.legs.lock().unwrap().iter().filter(|l| l.tran_status == "Future" && l.value_date <= as_of).cloned().collect())
    }

    async fn insert_gl_movement(&self, movement: GlMovementModel) -> LedgerResult<()> {
        self.movements.lock().unwrap().push(movement);
        Ok(())
    }

    async fn find_gl_movements_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<GlMovementModel>> {
        Ok(self.movements.lock().unwrap().iter().filter(|m| m.tran_date == tran_date).cloned().collect())
    }
}

/// `Accounts` directory over `AccountModel` rows, enough to drive EOD Job 1
/// and the interest-eligible account scan without the rest of master data.
#[derive(Default)]
pub struct MockAccountRepository {
    pub accounts: Mutex<Vec<AccountModel>>,
    pub sub_products: Mutex<Vec<SubProductModel>>,
    pub interest_rates: Mutex<Vec<InterestRateModel>>,
    pub find_by_account_no_calls: Mutex<u32>,
}

impl MockAccountRepository {
    pub fn with_account(self, account: AccountModel) -> Self {
        self.accounts.lock().unwrap().push(account);
        self
    }

    pub fn with_sub_product(self, sub_product: SubProductModel) -> Self {
        self.sub_products.lock().unwrap().push(sub_product);
        self
    }

    pub fn with_interest_rate(self, rate: InterestRateModel) -> Self {
        self.interest_rates.lock().unwrap().push(rate);
        self
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_account_no(&self, account_no: &str) -> LedgerResult<Option<AccountModel>> {
        *self.find_by_account_no_calls.lock().unwrap() += 1;
        Ok(self.accounts.lock().unwrap().iter().find(|a| a.account_no == account_no).cloned())
    }

    async fn exists(&self, account_no: &str) -> LedgerResult<bool> {
        Ok(self.accounts.lock().unwrap().iter().any(|a| a.account_no == account_no))
    }

    async fn insert(&self, account: AccountModel) -> LedgerResult<AccountModel> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(account)
    }

    async fn update_status(&self, account_no: &str, status: &str) -> LedgerResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.account_no == account_no) {
            a.status = status.to_string();
        }
        Ok(())
    }

    async fn find_active(&self) -> LedgerResult<Vec<AccountModel>> {
        Ok(self.accounts.lock().unwrap().iter().filter(|a| a.status == "Active").cloned().collect())
    }

    async fn find_interest_eligible(&self) -> LedgerResult<Vec<AccountModel>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == "Active" && a.is_customer && (a.gl_num.starts_with('1') || a.gl_num.starts_with('2')))
            .cloned()
            .collect())
    }

    async fn find_sub_product(&self, sub_product_code: &str) -> LedgerResult<Option<SubProductModel>> {
        Ok(self.sub_products.lock().unwrap().iter().find(|s| s.sub_product_code == sub_product_code).cloned())
    }

    async fn latest_interest_rate(&self, interest_code: &str, as_of: NaiveDate) -> LedgerResult<Option<InterestRateModel>> {
        Ok(self
            .interest_rates
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.interest_code == interest_code && r.effective_date <= as_of)
            .max_by_key(|r| r.effective_date)
            .cloned())
    }
}

/// `Acct_Bal` / `GL_Balance` / `Acct_Bal_Accrual` tables, keyed the same way
/// the Postgres implementation is, used by the EOD balance-update jobs.
#[derive(Default)]
pub struct MockBalanceRepository {
    accounts: Mutex<HashMap<(String, NaiveDate), AccountBalanceModel>>,
    gls: Mutex<HashMap<(String, NaiveDate), GlBalanceModel>>,
    accruals: Mutex<HashMap<(String, NaiveDate), AccountBalanceAccrualModel>>,
}

#[async_trait]
impl BalanceRepository for MockBalanceRepository {
    async fn find_account_row(&self, account_no: &str, tran_date: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        Ok(self.accounts.lock().unwrap().get(&(account_no.to_string(), tran_date)).cloned())
    }

    async fn latest_account_row(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.account_no == account_no && r.tran_date <= as_of)
            .max_by_key(|r| r.tran_date)
            .cloned())
    }

    async fn upsert_account_row(&self, row: AccountBalanceModel) -> LedgerResult<AccountBalanceModel> {
        self.accounts.lock().unwrap().insert((row.account_no.clone(), row.tran_date), row.clone());
        Ok(row)
    }

    async fn find_gl_row(&self, gl_num: &str, tran_date: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        Ok(self.gls.lock().unwrap().get(&(gl_num.to_string(), tran_date)).cloned())
    }

    async fn latest_gl_row(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        Ok(self.gls.lock().unwrap().values().filter(|r| r.gl_num == gl_num && r.tran_date <= as_of).max_by_key(|r| r.tran_date).cloned())
    }

    async fn upsert_gl_row(&self, row: GlBalanceModel) -> LedgerResult<GlBalanceModel> {
        self.gls.lock().unwrap().insert((row.gl_num.clone(), row.tran_date), row.clone());
        Ok(row)
    }

    async fn distinct_gl_nums_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<String>> {
        let mut nums: Vec<String> =
            self.gls.lock().unwrap().values().filter(|r| r.tran_date == tran_date).map(|r| r.gl_num.clone()).collect();
        nums.sort();
        nums.dedup();
        Ok(nums)
    }

    async fn upsert_accrual_row(&self, row: AccountBalanceAccrualModel) -> LedgerResult<AccountBalanceAccrualModel> {
        self.accruals.lock().unwrap().insert((row.account_no.clone(), row.tran_date), row.clone());
        Ok(row)
    }
}

/// `Intt_Accr_Tran` rows, keyed by `accr_tran_id`.
#[derive(Default)]
pub struct MockInterestAccrualRepository {
    pub legs: Mutex<Vec<InterestAccrualLegModel>>,
}

impl MockInterestAccrualRepository {
    pub fn with_leg(self, leg: InterestAccrualLegModel) -> Self {
        self.legs.lock().unwrap().push(leg);
        self
    }
}

#[async_trait]
impl InterestAccrualRepository for MockInterestAccrualRepository {
    async fn insert_leg(&self, leg: InterestAccrualLegModel) -> LedgerResult<()> {
        self.legs.lock().unwrap().push(leg);
        Ok(())
    }

    async fn find_pending(&self, accrual_date: NaiveDate) -> LedgerResult<Vec<InterestAccrualLegModel>> {
        Ok(self.legs.lock().unwrap().iter().filter(|l| l.accrual_date == accrual_date && l.status == "Pending").cloned().collect())
    }

    async fn mark_processed(&self, accr_tran_id: &str) -> LedgerResult<()> {
        let mut legs = self.legs.lock().unwrap();
        if let Some(leg) = legs.iter_mut().find(|l| l.accr_tran_id == accr_tran_id) {
            leg.status = "Processed".to_string();
        }
        Ok(())
    }

    async fn max_seq_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<u32> {
        Ok(self.legs.lock().unwrap().iter().filter(|l| l.accrual_date == accrual_date).count() as u32)
    }

    async fn delete_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<()> {
        self.legs.lock().unwrap().retain(|l| l.accrual_date != accrual_date);
        Ok(())
    }
}

/// `EOD_Log_Table`, keyed `(eod_date, job_name, start_timestamp)`; `latest`
/// returns the most recently started row for a `(eod_date, job_name)` pair.
#[derive(Default)]
pub struct MockEodLogRepository {
    pub rows: Mutex<Vec<EodLogModel>>,
}

#[async_trait]
impl EodLogRepository for MockEodLogRepository {
    async fn insert_start(&self, entry: EodLogModel) -> LedgerResult<()> {
        self.rows.lock().unwrap().push(entry);
        Ok(())
    }

    async fn complete(
        &self,
        eod_date: NaiveDate,
        job_name: &str,
        start_timestamp: DateTime<Utc>,
        end_timestamp: DateTime<Utc>,
        records_processed: i64,
        status: &str,
        error_message: Option<String>,
        failed_at_step: Option<String>,
    ) -> LedgerResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.eod_date == eod_date && r.job_name == job_name && r.start_timestamp == start_timestamp) {
            row.end_timestamp = Some(end_timestamp);
            row.records_processed = records_processed;
            row.status = status.to_string();
            row.error_message = error_message;
            row.failed_at_step = failed_at_step;
        }
        Ok(())
    }

    async fn latest(&self, eod_date: NaiveDate, job_name: &str) -> LedgerResult<Option<EodLogModel>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.eod_date == eod_date && r.job_name == job_name)
            .max_by_key(|r| r.start_timestamp)
            .cloned())
    }

    async fn all_for_date(&self, eod_date: NaiveDate) -> LedgerResult<Vec<EodLogModel>> {
        Ok(self.rows.lock().unwrap().iter().filter(|r| r.eod_date == eod_date).cloned().collect())
    }
}

/// `Parameter_Table` singleton row.
pub struct MockParameterRepository {
    pub row: Mutex<Option<ParameterModel>>,
}

impl MockParameterRepository {
    pub fn new(system_date: NaiveDate) -> Self {
        Self { row: Mutex::new(Some(ParameterModel { system_date, last_eod_date: None, last_eod_timestamp: None, last_eod_user: None })) }
    }
}

#[async_trait]
impl ParameterRepository for MockParameterRepository {
    async fn get(&self) -> LedgerResult<Option<ParameterModel>> {
        Ok(self.row.lock().unwrap().clone())
    }

    async fn set_system_date(&self, date: NaiveDate, user_id: &str, now: DateTime<Utc>) -> LedgerResult<()> {
        let mut row = self.row.lock().unwrap();
        *row = Some(ParameterModel { system_date: date, last_eod_date: Some(date), last_eod_timestamp: Some(now), last_eod_user: Some(user_id.to_string()) });
        Ok(())
    }
}

/// Always-succeeds interest accrual stub; `should_fail` flips it to exercise
/// EOD Job 2's failure path without wiring the real accrual algorithm.
pub struct StubInterestAccrualService {
    pub should_fail: bool,
}

impl Default for StubInterestAccrualService {
    fn default() -> Self {
        Self { should_fail: false }
    }
}

#[async_trait]
impl InterestAccrualService for StubInterestAccrualService {
    async fn accrue_all(&self, accrual_date: NaiveDate) -> LedgerResult<AccrualReport> {
        if self.should_fail {
            return Err(LedgerError::SystemDateNotConfigured);
        }
        Ok(AccrualReport { accrual_date, accounts_processed: 0, accounts_skipped: 0, errors: Vec::new() })
    }
}

/// Stub reports sink; only `write_reports` is exercised by the EOD job.
#[derive(Default)]
pub struct StubReportsService;

#[async_trait]
impl ReportsService for StubReportsService {
    async fn trial_balance(&self, _tran_date: NaiveDate) -> LedgerResult<TrialBalanceReport> {
        Err(LedgerError::Internal("trial_balance not exercised by this test".to_string()))
    }

    async fn balance_sheet(&self, _tran_date: NaiveDate) -> LedgerResult<BalanceSheetReport> {
        Err(LedgerError::Internal("balance_sheet not exercised by this test".to_string()))
    }

    async fn write_reports(&self, tran_date: NaiveDate) -> LedgerResult<(String, String)> {
        Ok((format!("reports/{tran_date}/trial_balance.csv"), format!("reports/{tran_date}/balance_sheet.xlsx")))
    }
}

/// In-memory unit of work: hands back the same shared `TransactionRepository`
/// / `BalanceRepository` on every `begin()`. The in-memory mocks have no
/// multi-statement rollback to simulate, so `commit`/`rollback` are no-ops —
/// the point of this mock is to let `TransactionServiceImpl`'s post/reverse
/// flow exercise the same session-scoped code path the Postgres
/// implementation runs.
pub struct MockUnitOfWork {
    transactions: Arc<dyn TransactionRepository>,
    balances: Arc<dyn BalanceRepository>,
}

impl MockUnitOfWork {
    pub fn new(transactions: Arc<dyn TransactionRepository>, balances: Arc<dyn BalanceRepository>) -> Self {
        Self { transactions, balances }
    }
}

#[async_trait]
impl UnitOfWork for MockUnitOfWork {
    async fn begin(&self) -> LedgerResult<Box<dyn UnitOfWorkSession>> {
        Ok(Box::new(MockUnitOfWorkSession { transactions: self.transactions.clone(), balances: self.balances.clone() }))
    }
}

struct MockUnitOfWorkSession {
    transactions: Arc<dyn TransactionRepository>,
    balances: Arc<dyn BalanceRepository>,
}

#[async_trait]
impl UnitOfWorkSession for MockUnitOfWorkSession {
    fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.transactions.clone()
    }

    fn balances(&self) -> Arc<dyn BalanceRepository> {
        self.balances.clone()
    }

    async fn commit(self: Box<Self>) -> LedgerResult<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> LedgerResult<()> {
        Ok(())
    }
}
