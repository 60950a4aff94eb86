use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::error::LedgerResult;
use ledger_db::models::balance::{AccountBalanceAccrualModel, AccountBalanceModel, GlBalanceModel};
use ledger_db::models::transaction::{GlMovementModel, TransactionLegModel};
use ledger_db::repository::{BalanceRepository, TransactionRepository, UnitOfWork, UnitOfWorkSession};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

const LEG_COLUMNS: &str = "tran_id, line_no, tran_date, value_date, account_no, dr_cr_flag, currency, \
    fcy_amount, exchange_rate, lcy_amount, narration, tran_status, pointing_id, created_at";
const ACCT_BAL_COLUMNS: &str =
    "account_no, tran_date, opening_bal, dr_summation, cr_summation, closing_bal, current_balance, available_balance, last_updated";
const GL_BAL_COLUMNS: &str = "gl_num, tran_date, opening_bal, dr_summation, cr_summation, closing_bal, last_updated";

type SharedTx = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

/// Opens one `sqlx` transaction per `begin()` call and hands both
/// repositories back scoped to it, so every balance/GL/leg mutation a
/// Post or Reverse run performs lands in the same durable unit of work
/// (spec.md §4.5) instead of each committing independently.
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn begin(&self) -> LedgerResult<Box<dyn UnitOfWorkSession>> {
        let tx = self.pool.begin().await?;
        let shared: SharedTx = Arc::new(Mutex::new(Some(tx)));
        Ok(Box::new(PgUnitOfWorkSession {
            transactions: Arc::new(TxScopedTransactionRepository { tx: shared.clone() }),
            balances: Arc::new(TxScopedBalanceRepository { tx: shared.clone() }),
            tx: shared,
        }))
    }
}

struct PgUnitOfWorkSession {
    transactions: Arc<dyn TransactionRepository>,
    balances: Arc<dyn BalanceRepository>,
    tx: SharedTx,
}

#[async_trait]
impl UnitOfWorkSession for PgUnitOfWorkSession {
    fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.transactions.clone()
    }

    fn balances(&self) -> Arc<dyn BalanceRepository> {
        self.balances.clone()
    }

    async fn commit(self: Box<Self>) -> LedgerResult<()> {
        let tx = self.tx.lock().await.take().expect("unit-of-work transaction already consumed");
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> LedgerResult<()> {
        let tx = self.tx.lock().await.take().expect("unit-of-work transaction already consumed");
        tx.rollback().await?;
        Ok(())
    }
}

/// `TransactionRepository`, re-implemented over the session's shared
/// transaction instead of the pool; same SQL text as
/// `TransactionRepositoryImpl`.
struct TxScopedTransactionRepository {
    tx: SharedTx,
}

#[async_trait]
impl TransactionRepository for TxScopedTransactionRepository {
    async fn insert_legs(&self, legs: Vec<TransactionLegModel>) -> LedgerResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        for leg in legs {
            sqlx::query(&format!(
                r#"
                INSERT INTO tran_table ({LEG_COLUMNS})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#
            ))
            .bind(&leg.tran_id)
            .bind(leg.line_no)
            .bind(leg.tran_date)
            .bind(leg.value_date)
            .bind(&leg.account_no)
            .bind(&leg.dr_cr_flag)
            .bind(&leg.currency)
            .bind(leg.fcy_amount)
            .bind(leg.exchange_rate)
            .bind(leg.lcy_amount)
            .bind(&leg.narration)
            .bind(&leg.tran_status)
            .bind(&leg.pointing_id)
            .bind(leg.created_at)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn find_legs_by_base(&self, base_tran_id: &str) -> LedgerResult<Vec<TransactionLegModel>> {
        let pattern = format!("{base_tran_id}-%");
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let rows = sqlx::query_as::<_, TransactionLegModel>(&format!("SELECT {LEG_COLUMNS} FROM tran_table WHERE tran_id LIKE $1 ORDER BY line_no"))
            .bind(pattern)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows)
    }

    async fn update_leg_status(&self, tran_id: &str, status: &str) -> LedgerResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        sqlx::query("UPDATE tran_table SET tran_status = $1 WHERE tran_id = $2")
            .bind(status)
            .bind(tran_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn find_legs_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let rows = sqlx::query_as::<_, TransactionLegModel>(&format!(
            r#"
            SELECT {LEG_COLUMNS} FROM tran_table
            WHERE account_no = $1 AND tran_date BETWEEN $2 AND $3
            ORDER BY tran_date, created_at
            "#
        ))
        .bind(account_no)
        .bind(from)
        .bind(to)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    async fn sum_today(&self, account_no: &str, tran_date: NaiveDate, flag: DrCrFlag) -> LedgerResult<Decimal> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row: (Option<Decimal>,) = sqlx::query_as(
            r#"
            SELECT SUM(lcy_amount) FROM tran_table
            WHERE account_no = $1 AND tran_date = $2 AND dr_cr_flag = $3
              AND tran_status IN ('Entry', 'Posted', 'Verified')
            "#,
        )
        .bind(account_no)
        .bind(tran_date)
        .bind(flag.as_str())
        .fetch_one(&mut **tx)
        .await?;
        Ok(row.0.unwrap_or_default())
    }

    async fn count_legs_on_date(&self, tran_date: NaiveDate) -> LedgerResult<i64> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tran_table WHERE tran_date = $1").bind(tran_date).fetch_one(&mut **tx).await?;
        Ok(row.0)
    }

    async fn find_future_due(&self, as_of: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let rows = sqlx::query_as::<_, TransactionLegModel>(&format!(
            r#"
            SELECT {LEG_COLUMNS} FROM tran_table
            WHERE tran_status = 'Future' AND value_date <= $1
            ORDER BY value_date, created_at
            "#
        ))
        .bind(as_of)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    async fn insert_gl_movement(&self, movement: GlMovementModel) -> LedgerResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        sqlx::query(
            r#"
            INSERT INTO gl_movement (tran_id, gl_num, dr_cr_flag, tran_date, value_date, amount, balance_after, is_accrual)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&movement.tran_id)
        .bind(&movement.gl_num)
        .bind(&movement.dr_cr_flag)
        .bind(movement.tran_date)
        .bind(movement.value_date)
        .bind(movement.amount)
        .bind(movement.balance_after)
        .bind(movement.is_accrual)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn find_gl_movements_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<GlMovementModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let rows = sqlx::query_as::<_, GlMovementModel>(
            r#"
            SELECT tran_id, gl_num, dr_cr_flag, tran_date, value_date, amount, balance_after, is_accrual
            FROM gl_movement WHERE tran_date = $1
            ORDER BY gl_num
            "#,
        )
        .bind(tran_date)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }
}

/// `BalanceRepository`, re-implemented over the session's shared
/// transaction instead of the pool; same SQL text as
/// `BalanceRepositoryImpl`.
struct TxScopedBalanceRepository {
    tx: SharedTx,
}

#[async_trait]
impl BalanceRepository for TxScopedBalanceRepository {
    async fn find_account_row(&self, account_no: &str, tran_date: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row = sqlx::query_as::<_, AccountBalanceModel>(&format!("SELECT {ACCT_BAL_COLUMNS} FROM acct_bal WHERE account_no = $1 AND tran_date = $2"))
            .bind(account_no)
            .bind(tran_date)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    async fn latest_account_row(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row = sqlx::query_as::<_, AccountBalanceModel>(&format!(
            r#"
            SELECT {ACCT_BAL_COLUMNS} FROM acct_bal
            WHERE account_no = $1 AND tran_date <= $2
            ORDER BY tran_date DESC
            LIMIT 1
            "#
        ))
        .bind(account_no)
        .bind(as_of)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }

    async fn upsert_account_row(&self, row: AccountBalanceModel) -> LedgerResult<AccountBalanceModel> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let stored = sqlx::query_as::<_, AccountBalanceModel>(&format!(
            r#"
            INSERT INTO acct_bal ({ACCT_BAL_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (account_no, tran_date) DO UPDATE SET
                opening_bal = EXCLUDED.opening_bal,
                dr_summation = EXCLUDED.dr_summation,
                cr_summation = EXCLUDED.cr_summation,
                closing_bal = EXCLUDED.closing_bal,
                current_balance = EXCLUDED.current_balance,
                available_balance = EXCLUDED.available_balance,
                last_updated = EXCLUDED.last_updated
            RETURNING {ACCT_BAL_COLUMNS}
            "#
        ))
        .bind(&row.account_no)
        .bind(row.tran_date)
        .bind(row.opening_bal)
        .bind(row.dr_summation)
        .bind(row.cr_summation)
        .bind(row.closing_bal)
        .bind(row.current_balance)
        .bind(row.available_balance)
        .bind(row.last_updated)
        .fetch_one(&mut **tx)
        .await?;
        Ok(stored)
    }

    async fn find_gl_row(&self, gl_num: &str, tran_date: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row = sqlx::query_as::<_, GlBalanceModel>(&format!("SELECT {GL_BAL_COLUMNS} FROM gl_balance WHERE gl_num = $1 AND tran_date = $2"))
            .bind(gl_num)
            .bind(tran_date)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    async fn latest_gl_row(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let row = sqlx::query_as::<_, GlBalanceModel>(&format!(
            r#"
            SELECT {GL_BAL_COLUMNS} FROM gl_balance
            WHERE gl_num = $1 AND tran_date <= $2
            ORDER BY tran_date DESC
            LIMIT 1
            "#
        ))
        .bind(gl_num)
        .bind(as_of)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }

    async fn upsert_gl_row(&self, row: GlBalanceModel) -> LedgerResult<GlBalanceModel> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let stored = sqlx::query_as::<_, GlBalanceModel>(&format!(
            r#"
            INSERT INTO gl_balance ({GL_BAL_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (gl_num, tran_date) DO UPDATE SET
                opening_bal = EXCLUDED.opening_bal,
                dr_summation = EXCLUDED.dr_summation,
                cr_summation = EXCLUDED.cr_summation,
                closing_bal = EXCLUDED.closing_bal,
                last_updated = EXCLUDED.last_updated
            RETURNING {GL_BAL_COLUMNS}
            "#
        ))
        .bind(&row.gl_num)
        .bind(row.tran_date)
        .bind(row.opening_bal)
        .bind(row.dr_summation)
        .bind(row.cr_summation)
        .bind(row.closing_bal)
        .bind(row.last_updated)
        .fetch_one(&mut **tx)
        .await?;
        Ok(stored)
    }

    async fn distinct_gl_nums_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<String>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT gl_num FROM gl_movement WHERE tran_date = $1 ORDER BY gl_num")
            .bind(tran_date)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(|(g,)| g).collect())
    }

    async fn upsert_accrual_row(&self, row: AccountBalanceAccrualModel) -> LedgerResult<AccountBalanceAccrualModel> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().expect("unit-of-work transaction already consumed");
        let stored = sqlx::query_as::<_, AccountBalanceAccrualModel>(
            r#"
            INSERT INTO acct_bal_accrual (account_no, tran_date, accrued_dr, accrued_cr, last_updated)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_no, tran_date) DO UPDATE SET
                accrued_dr = EXCLUDED.accrued_dr,
                accrued_cr = EXCLUDED.accrued_cr,
                last_updated = EXCLUDED.last_updated
            RETURNING account_no, tran_date, accrued_dr, accrued_cr, last_updated
            "#,
        )
        .bind(&row.account_no)
        .bind(row.tran_date)
        .bind(row.accrued_dr)
        .bind(row.accrued_cr)
        .bind(row.last_updated)
        .fetch_one(&mut **tx)
        .await?;
        Ok(stored)
    }
}
