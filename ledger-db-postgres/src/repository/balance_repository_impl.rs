use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;
use ledger_db::models::balance::{AccountBalanceAccrualModel, AccountBalanceModel, GlBalanceModel};
use ledger_db::repository::BalanceRepository;
use sqlx::PgPool;

pub struct BalanceRepositoryImpl {
    pool: PgPool,
}

impl BalanceRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACCT_BAL_COLUMNS: &str =
    "account_no, tran_date, opening_bal, dr_summation, cr_summation, closing_bal, current_balance, available_balance, last_updated";
const GL_BAL_COLUMNS: &str = "gl_num, tran_date, opening_bal, dr_summation, cr_summation, closing_bal, last_updated";

#[async_trait]
impl BalanceRepository for BalanceRepositoryImpl {
    async fn find_account_row(&self, account_no: &str, tran_date: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
        let row = sqlx::query_as::<_, AccountBalanceModel>(&format!(
            "SELECT {ACCT_BAL_COLUMNS} FROM acct_bal WHERE account_no = $1 AND tran_date = $2"
        ))
        .bind(account_no)
        .bind(tran_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn latest_account_row(&self, account_no: &str, as_of: NaiveDate) -> LedgerResult<Option<AccountBalanceModel>> {
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
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_account_row(&self, row: AccountBalanceModel) -> LedgerResult<AccountBalanceModel> {
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
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn find_gl_row(&self, gl_num: &str, tran_date: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
        let row = sqlx::query_as::<_, GlBalanceModel>(&format!("SELECT {GL_BAL_COLUMNS} FROM gl_balance WHERE gl_num = $1 AND tran_date = $2"))
            .bind(gl_num)
            .bind(tran_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn latest_gl_row(&self, gl_num: &str, as_of: NaiveDate) -> LedgerResult<Option<GlBalanceModel>> {
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
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_gl_row(&self, row: GlBalanceModel) -> LedgerResult<GlBalanceModel> {
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
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn distinct_gl_nums_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT gl_num FROM gl_movement WHERE tran_date = $1 ORDER BY gl_num")
            .bind(tran_date)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(g,)| g).collect())
    }

    async fn upsert_accrual_row(&self, row: AccountBalanceAccrualModel) -> LedgerResult<AccountBalanceAccrualModel> {
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
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }
}
