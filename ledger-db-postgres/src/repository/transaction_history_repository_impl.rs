use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::error::LedgerResult;
use ledger_db::models::transaction::TxnHistModel;
use ledger_db::repository::TransactionHistoryRepository;
use sqlx::PgPool;

pub struct TransactionHistoryRepositoryImpl {
    pool: PgPool,
}

impl TransactionHistoryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionHistoryRepository for TransactionHistoryRepositoryImpl {
    async fn insert(&self, row: TxnHistModel) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO txn_hist_acct (tran_id, account_no, tran_date, value_date, dr_cr_flag, lcy_amount, balance_after, narration, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&row.tran_id)
        .bind(&row.account_no)
        .bind(row.tran_date)
        .bind(row.value_date)
        .bind(&row.dr_cr_flag)
        .bind(row.lcy_amount)
        .bind(row.balance_after)
        .bind(&row.narration)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_account(&self, account_no: &str, from: NaiveDate, to: NaiveDate) -> LedgerResult<Vec<TxnHistModel>> {
        let rows = sqlx::query_as::<_, TxnHistModel>(
            r#"
            SELECT tran_id, account_no, tran_date, value_date, dr_cr_flag, lcy_amount, balance_after, narration, created_at
            FROM txn_hist_acct
            WHERE account_no = $1 AND tran_date BETWEEN $2 AND $3
            ORDER BY tran_date, created_at
            "#,
        )
        .bind(account_no)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
