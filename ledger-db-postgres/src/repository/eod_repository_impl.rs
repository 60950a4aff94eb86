use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use ledger_api::error::LedgerResult;
use ledger_db::models::eod::{EodLogModel, ParameterModel};
use ledger_db::repository::{EodLogRepository, ParameterRepository};
use sqlx::PgPool;

pub struct ParameterRepositoryImpl {
    pool: PgPool,
}

impl ParameterRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParameterRepository for ParameterRepositoryImpl {
    async fn get(&self) -> LedgerResult<Option<ParameterModel>> {
        let row = sqlx::query_as::<_, ParameterModel>(
            "SELECT system_date, last_eod_date, last_eod_timestamp, last_eod_user FROM parameter_table LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_system_date(&self, date: NaiveDate, user_id: &str, now: DateTime<Utc>) -> LedgerResult<()> {
        sqlx::query(
            r#"
            UPDATE parameter_table SET system_date = $1, last_eod_date = $1, last_eod_timestamp = $2, last_eod_user = $3
            "#,
        )
        .bind(date)
        .bind(now)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

pub struct EodLogRepositoryImpl {
    pool: PgPool,
}

impl EodLogRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EodLogRepository for EodLogRepositoryImpl {
    async fn insert_start(&self, entry: EodLogModel) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO eod_log_table (eod_date, job_name, start_timestamp, end_timestamp, records_processed, status, error_message, failed_at_step)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.eod_date)
        .bind(&entry.job_name)
        .bind(entry.start_timestamp)
        .bind(entry.end_timestamp)
        .bind(entry.records_processed)
        .bind(&entry.status)
        .bind(&entry.error_message)
        .bind(&entry.failed_at_step)
        .execute(&self.pool)
        .await?;
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
        sqlx::query(
            r#"
            UPDATE eod_log_table
            SET end_timestamp = $1, records_processed = $2, status = $3, error_message = $4, failed_at_step = $5
            WHERE eod_date = $6 AND job_name = $7 AND start_timestamp = $8
            "#,
        )
        .bind(end_timestamp)
        .bind(records_processed)
        .bind(status)
        .bind(&error_message)
        .bind(&failed_at_step)
        .bind(eod_date)
        .bind(job_name)
        .bind(start_timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn latest(&self, eod_date: NaiveDate, job_name: &str) -> LedgerResult<Option<EodLogModel>> {
        let row = sqlx::query_as::<_, EodLogModel>(
            r#"
            SELECT eod_date, job_name, start_timestamp, end_timestamp, records_processed, status, error_message, failed_at_step
            FROM eod_log_table
            WHERE eod_date = $1 AND job_name = $2
            ORDER BY start_timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(eod_date)
        .bind(job_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn all_for_date(&self, eod_date: NaiveDate) -> LedgerResult<Vec<EodLogModel>> {
        let rows = sqlx::query_as::<_, EodLogModel>(
            r#"
            SELECT eod_date, job_name, start_timestamp, end_timestamp, records_processed, status, error_message, failed_at_step
            FROM eod_log_table
            WHERE eod_date = $1
            ORDER BY start_timestamp
            "#,
        )
        .bind(eod_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
