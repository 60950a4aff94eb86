use chrono::{DateTime, NaiveDate, Utc};
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::transaction::{GlMovement, TransactionLeg, TranStatus, TxnHistRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn flag_str(f: DrCrFlag) -> &'static str {
    f.as_str()
}

fn flag_from_str(s: &str) -> DrCrFlag {
    match s {
        "D" => DrCrFlag::D,
        _ => DrCrFlag::C,
    }
}

fn status_str(s: TranStatus) -> &'static str {
    match s {
        TranStatus::Entry => "Entry",
        TranStatus::Posted => "Posted",
        TranStatus::Verified => "Verified",
        TranStatus::Future => "Future",
    }
}

fn status_from_str(s: &str) -> TranStatus {
    match s {
        "Entry" => TranStatus::Entry,
        "Posted" => TranStatus::Posted,
        "Verified" => TranStatus::Verified,
        _ => TranStatus::Future,
    }
}

/// `Tran_Table` row (spec.md §3/§6), primary key `tran_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionLegModel {
    pub tran_id: String,
    pub line_no: i32,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub account_no: String,
    pub dr_cr_flag: String,
    pub currency: String,
    pub fcy_amount: Decimal,
    pub exchange_rate: Decimal,
    pub lcy_amount: Decimal,
    pub narration: String,
    pub tran_status: String,
    pub pointing_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionLegModel> for TransactionLeg {
    fn from(m: TransactionLegModel) -> Self {
        TransactionLeg {
            tran_id: m.tran_id,
            line_no: m.line_no as u16,
            tran_date: m.tran_date,
            value_date: m.value_date,
            account_no: m.account_no,
            dr_cr_flag: flag_from_str(&m.dr_cr_flag),
            currency: m.currency,
            fcy_amount: m.fcy_amount,
            exchange_rate: m.exchange_rate,
            lcy_amount: m.lcy_amount,
            narration: m.narration,
            tran_status: status_from_str(&m.tran_status),
            pointing_id: m.pointing_id,
            created_at: m.created_at,
        }
    }
}

impl From<TransactionLeg> for TransactionLegModel {
    fn from(d: TransactionLeg) -> Self {
        TransactionLegModel {
            tran_id: d.tran_id,
            line_no: d.line_no as i32,
            tran_date: d.tran_date,
            value_date: d.value_date,
            account_no: d.account_no,
            dr_cr_flag: flag_str(d.dr_cr_flag).to_string(),
            currency: d.currency,
            fcy_amount: d.fcy_amount,
            exchange_rate: d.exchange_rate,
            lcy_amount: d.lcy_amount,
            narration: d.narration,
            tran_status: status_str(d.tran_status).to_string(),
            pointing_id: d.pointing_id,
            created_at: d.created_at,
        }
    }
}

/// `GL_Movement` row (spec.md §3/§6). Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GlMovementModel {
    pub tran_id: String,
    pub gl_num: String,
    pub dr_cr_flag: String,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub is_accrual: bool,
}

impl From<GlMovementModel> for GlMovement {
    fn from(m: GlMovementModel) -> Self {
        GlMovement {
            tran_id: m.tran_id,
            gl_num: m.gl_num,
            dr_cr_flag: flag_from_str(&m.dr_cr_flag),
            tran_date: m.tran_date,
            value_date: m.value_date,
            amount: m.amount,
            balance_after: m.balance_after,
            is_accrual: m.is_accrual,
        }
    }
}

impl From<GlMovement> for GlMovementModel {
    fn from(d: GlMovement) -> Self {
        GlMovementModel {
            tran_id: d.tran_id,
            gl_num: d.gl_num,
            dr_cr_flag: flag_str(d.dr_cr_flag).to_string(),
            tran_date: d.tran_date,
            value_date: d.value_date,
            amount: d.amount,
            balance_after: d.balance_after,
            is_accrual: d.is_accrual,
        }
    }
}

/// `Txn_Hist_Acct` row (spec.md §3/§6) written once per leg on Verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TxnHistModel {
    pub tran_id: String,
    pub account_no: String,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub dr_cr_flag: String,
    pub lcy_amount: Decimal,
    pub balance_after: Decimal,
    pub narration: String,
    pub created_at: DateTime<Utc>,
}

impl From<TxnHistModel> for TxnHistRow {
    fn from(m: TxnHistModel) -> Self {
        TxnHistRow {
            tran_id: m.tran_id,
            account_no: m.account_no,
            tran_date: m.tran_date,
            value_date: m.value_date,
            dr_cr_flag: flag_from_str(&m.dr_cr_flag),
            lcy_amount: m.lcy_amount,
            balance_after: m.balance_after,
            narration: m.narration,
            created_at: m.created_at,
        }
    }
}

impl From<TxnHistRow> for TxnHistModel {
    fn from(d: TxnHistRow) -> Self {
        TxnHistModel {
            tran_id: d.tran_id,
            account_no: d.account_no,
            tran_date: d.tran_date,
            value_date: d.value_date,
            dr_cr_flag: flag_str(d.dr_cr_flag).to_string(),
            lcy_amount: d.lcy_amount,
            balance_after: d.balance_after,
            narration: d.narration,
            created_at: d.created_at,
        }
    }
}
