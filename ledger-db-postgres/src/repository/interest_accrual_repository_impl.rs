use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;
use ledger_db::models::interest::InterestAccrualLegModel;
use ledger_db::repository::InterestAccrualRepository;
use sqlx::PgPool;

pub struct InterestAccrualRepositoryImpl {
    pool: PgPool,
}

impl InterestAccrualRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterestAccrualRepository for InterestAccrualRepositoryImpl {
    async fn insert_leg(&self, leg: InterestAccrualLegModel) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO intt_accr_tran (accr_tran_id, account_no, gl_num, dr_cr_flag, amount, accrual_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&leg.accr_tran_id)
        .bind(&leg.account_no)
        .bind(&leg.gl_num)
        .bind(&leg.dr_cr_flag)
        .bind(leg.amount)
        .bind(leg.accrual_date)
        .bind(&leg.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_pending(&self, accrual_date: NaiveDate) -> LedgerResult<Vec<InterestAccrualLegModel>> {
        let rows = sqlx::query_as::<_, InterestAccrualLegModel>(
            r#"
            SELECT accr_tran_id, account_no, gl_num, dr_cr_flag, amount, accrual_date, status
            FROM intt_accr_tran
            WHERE accrual_date = $1 AND status = 'Pending'
            ORDER BY accr_tran_id
            "#,
        )
        .bind(accrual_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn mark_processed(&self, accr_tran_id: &str) -> LedgerResult<()> {
        sqlx::query("UPDATE intt_accr_tran SET status = 'Processed' WHERE accr_tran_id = $1")
            .bind(accr_tran_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn max_seq_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<u32> {
        let prefix = format!("S{}", accrual_date.format("%Y%m%d"));
        let rows: Vec<(String,)> = sqlx::query_as("SELECT accr_tran_id FROM intt_accr_tran WHERE accrual_date = $1 AND accr_tran_id LIKE $2")
            .bind(accrual_date)
            .bind(format!("{prefix}%"))
            .fetch_all(&self.pool)
            .await?;
        let max_seq = rows
            .iter()
            .filter_map(|(id,)| id.get(9..18))
            .filter_map(|seq| seq.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Ok(max_seq)
    }

    async fn delete_for_date(&self, accrual_date: NaiveDate) -> LedgerResult<()> {
        sqlx::query("DELETE FROM intt_accr_tran WHERE accrual_date = $1")
            .bind(accrual_date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
