use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_db::models::account::{AccountModel, AccountSeqModel, InterestRateModel, SubProductModel};
use ledger_db::repository::{AccountRepository, AccountSeqRepository};
use sqlx::PgPool;

pub struct AccountRepositoryImpl {
    pool: PgPool,
}

impl AccountRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str = "account_no, is_customer, customer_id, gl_num, sub_product_code, status, \
    opening_date, maturity_date, closure_date, loan_limit, fixed_rate_at_opening";

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn find_by_account_no(&self, account_no: &str) -> LedgerResult<Option<AccountModel>> {
        let row = sqlx::query_as::<_, AccountModel>(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_no = $1"))
            .bind(account_no)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists(&self, account_no: &str) -> LedgerResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE account_no = $1)")
            .bind(account_no)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn insert(&self, account: AccountModel) -> LedgerResult<AccountModel> {
        let row = sqlx::query_as::<_, AccountModel>(&format!(
            r#"
            INSERT INTO accounts ({ACCOUNT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.account_no)
        .bind(account.is_customer)
        .bind(&account.customer_id)
        .bind(&account.gl_num)
        .bind(&account.sub_product_code)
        .bind(&account.status)
        .bind(account.opening_date)
        .bind(account.maturity_date)
        .bind(account.closure_date)
        .bind(account.loan_limit)
        .bind(account.fixed_rate_at_opening)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_status(&self, account_no: &str, status: &str) -> LedgerResult<()> {
        let result = sqlx::query("UPDATE accounts SET status = $1 WHERE account_no = $2")
            .bind(status)
            .bind(account_no)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(account_no.to_string()));
        }
        Ok(())
    }

    async fn find_active(&self) -> LedgerResult<Vec<AccountModel>> {
        let rows = sqlx::query_as::<_, AccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE status = 'Active' ORDER BY account_no"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_interest_eligible(&self) -> LedgerResult<Vec<AccountModel>> {
        let rows = sqlx::query_as::<_, AccountModel>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS} FROM accounts
            WHERE status = 'Active' AND (gl_num LIKE '1%' OR gl_num LIKE '2%')
            ORDER BY account_no
            "#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_sub_product(&self, sub_product_code: &str) -> LedgerResult<Option<SubProductModel>> {
        let row = sqlx::query_as::<_, SubProductModel>(
            r#"
            SELECT sub_product_code, interest_code, interest_increment,
                   receivable_gl_num, income_gl_num, payable_gl_num, expenditure_gl_num
            FROM sub_products WHERE sub_product_code = $1
            "#,
        )
        .bind(sub_product_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn latest_interest_rate(&self, interest_code: &str, as_of: NaiveDate) -> LedgerResult<Option<InterestRateModel>> {
        let row = sqlx::query_as::<_, InterestRateModel>(
            r#"
            SELECT interest_code, effective_date, interest_rate
            FROM interest_rates
            WHERE interest_code = $1 AND effective_date <= $2
            ORDER BY effective_date DESC
            LIMIT 1
            "#,
        )
        .bind(interest_code)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

pub struct AccountSeqRepositoryImpl {
    pool: PgPool,
}

impl AccountSeqRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountSeqRepository for AccountSeqRepositoryImpl {
    /// Single-writer per-GL counter, capped at 99 (spec.md §3): the update
    /// itself enforces the cap so two concurrent callers can't both succeed
    /// past it.
    async fn next(&self, gl_num: &str) -> LedgerResult<i32> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE account_seq SET last_seq = last_seq + 1
            WHERE gl_num = $1 AND last_seq < 99
            RETURNING last_seq
            "#,
        )
        .bind(gl_num)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((seq,)) => Ok(seq),
            None => {
                let inserted: Option<(i32,)> = sqlx::query_as(
                    r#"
                    INSERT INTO account_seq (gl_num, last_seq) VALUES ($1, 1)
                    ON CONFLICT (gl_num) DO NOTHING
                    RETURNING last_seq
                    "#,
                )
                .bind(gl_num)
                .fetch_optional(&self.pool)
                .await?;
                match inserted {
                    Some((seq,)) => Ok(seq),
                    None => Err(LedgerError::AccountSeqExhausted { gl_num: gl_num.to_string() }),
                }
            }
        }
    }

    async fn peek(&self, gl_num: &str) -> LedgerResult<AccountSeqModel> {
        let row = sqlx::query_as::<_, AccountSeqModel>("SELECT gl_num, last_seq FROM account_seq WHERE gl_num = $1")
            .bind(gl_num)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.unwrap_or_else(|| AccountSeqModel { gl_num: gl_num.to_string(), last_seq: 0 }))
    }
}
