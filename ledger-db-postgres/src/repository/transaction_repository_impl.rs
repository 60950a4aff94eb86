use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::error::LedgerResult;
use ledger_db::models::transaction::{GlMovementModel, TransactionLegModel};
use ledger_db::repository::TransactionRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;

pub struct TransactionRepositoryImpl {
    pool: PgPool,
}

impl TransactionRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LEG_COLUMNS: &str = "tran_id, line_no, tran_date, value_date, account_no, dr_cr_flag, currency, \
    fcy_amount, exchange_rate, lcy_amount, narration, tran_status, pointing_id, created_at";

#[async_trait]
impl TransactionRepository for TransactionRepositoryImpl {
    /// All legs of a transaction insert together as one unit of work
    /// (spec.md §4.5): if any leg fails the whole batch rolls back.
    async fn insert_legs(&self, legs: Vec<TransactionLegModel>) -> LedgerResult<()> {
        let mut tx = self.pool.begin().await?;
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
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_legs_by_base(&self, base_tran_id: &str) -> LedgerResult<Vec<TransactionLegModel>> {
        let pattern = format!("{base_tran_id}-%");
        let rows = sqlx::query_as::<_, TransactionLegModel>(&format!(
            "SELECT {LEG_COLUMNS} FROM tran_table WHERE tran_id LIKE $1 ORDER BY line_no"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_leg_status(&self, tran_id: &str, status: &str) -> LedgerResult<()> {
        sqlx::query("UPDATE tran_table SET tran_status = $1 WHERE tran_id = $2")
            .bind(status)
            .bind(tran_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_legs_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
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
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn sum_today(&self, account_no: &str, tran_date: NaiveDate, flag: DrCrFlag) -> LedgerResult<Decimal> {
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
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0.unwrap_or_default())
    }

    async fn count_legs_on_date(&self, tran_date: NaiveDate) -> LedgerResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tran_table WHERE tran_date = $1")
            .bind(tran_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_future_due(&self, as_of: NaiveDate) -> LedgerResult<Vec<TransactionLegModel>> {
        let rows = sqlx::query_as::<_, TransactionLegModel>(&format!(
            r#"
            SELECT {LEG_COLUMNS} FROM tran_table
            WHERE tran_status = 'Future' AND value_date <= $1
            ORDER BY value_date, created_at
            "#
        ))
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_gl_movement(&self, movement: GlMovementModel) -> LedgerResult<()> {
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
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_gl_movements_on(&self, tran_date: NaiveDate) -> LedgerResult<Vec<GlMovementModel>> {
        let rows = sqlx::query_as::<_, GlMovementModel>(
            r#"
            SELECT tran_id, gl_num, dr_cr_flag, tran_date, value_date, amount, balance_after, is_accrual
            FROM gl_movement WHERE tran_date = $1
            ORDER BY gl_num
            "#,
        )
        .bind(tran_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
