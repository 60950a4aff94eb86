use chrono::{DateTime, NaiveDate, Utc};
use ledger_api::domain::eod::{EodJobStatus, EodLogEntry, SystemParameters};
use serde::{Deserialize, Serialize};

/// `Parameter_Table` row (spec.md §3/§6) — a key/value store collapsed here
/// to the single row the ledger core actually reads: `System_Date` and the
/// last-EOD bookkeeping columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ParameterModel {
    pub system_date: NaiveDate,
    pub last_eod_date: Option<NaiveDate>,
    pub last_eod_timestamp: Option<DateTime<Utc>>,
    pub last_eod_user: Option<String>,
}

impl From<ParameterModel> for SystemParameters {
    fn from(m: ParameterModel) -> Self {
        SystemParameters {
            system_date: m.system_date,
            last_eod_date: m.last_eod_date,
            last_eod_timestamp: m.last_eod_timestamp,
            last_eod_user: m.last_eod_user,
        }
    }
}

/// `EOD_Log_Table` row (spec.md §3/§6), keyed `(eod_date, job_name, start_timestamp)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EodLogModel {
    pub eod_date: NaiveDate,
    pub job_name: String,
    pub start_timestamp: DateTime<Utc>,
    pub end_timestamp: Option<DateTime<Utc>>,
    pub records_processed: i64,
    pub status: String,
    pub error_message: Option<String>,
    pub failed_at_step: Option<String>,
}

impl From<EodLogModel> for EodLogEntry {
    fn from(m: EodLogModel) -> Self {
        EodLogEntry {
            eod_date: m.eod_date,
            job_name: m.job_name,
            start_timestamp: m.start_timestamp,
            end_timestamp: m.end_timestamp,
            records_processed: m.records_processed,
            status: match m.status.as_str() {
                "Running" => EodJobStatus::Running,
                "Success" => EodJobStatus::Success,
                _ => EodJobStatus::Failed,
            },
            error_message: m.error_message,
            failed_at_step: m.failed_at_step,
        }
    }
}

impl From<EodLogEntry> for EodLogModel {
    fn from(d: EodLogEntry) -> Self {
        EodLogModel {
            eod_date: d.eod_date,
            job_name: d.job_name,
            start_timestamp: d.start_timestamp,
            end_timestamp: d.end_timestamp,
            records_processed: d.records_processed,
            status: match d.status {
                EodJobStatus::Running => "Running".to_string(),
                EodJobStatus::Success => "Success".to_string(),
                EodJobStatus::Failed => "Failed".to_string(),
            },
            error_message: d.error_message,
            failed_at_step: d.failed_at_step,
        }
    }
}
