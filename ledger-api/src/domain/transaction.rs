use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::DrCrFlag;

/// `Entry -> Posted -> Verified`, with `Future` promoted to `Posted` by BOD
/// (spec.md §4.5). Reversal never mutates an existing leg; it creates a new
/// transaction carrying a `pointing_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranStatus {
    Entry,
    Posted,
    Verified,
    Future,
}

/// One leg of a multi-leg transaction (spec.md §3 "Transaction-Leg"). Legs
/// sharing the `tran_id` prefix before the final `-<lineNo>` form one
/// transaction. Immutable except for `tran_status` transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLeg {
    pub tran_id: String,
    pub line_no: u16,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub account_no: String,
    pub dr_cr_flag: DrCrFlag,
    pub currency: String,
    pub fcy_amount: Decimal,
    pub exchange_rate: Decimal,
    pub lcy_amount: Decimal,
    pub narration: String,
    pub tran_status: TranStatus,
    pub pointing_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransactionLeg {
    /// Transaction-group identifier: the `tran_id` prefix shared by every
    /// leg of this transaction, i.e. everything before the final `-<lineNo>`.
    pub fn base_tran_id(&self) -> &str {
        self.tran_id.rsplit_once('-').map(|(base, _)| base).unwrap_or(&self.tran_id)
    }
}

/// One leg of a transaction as supplied by a caller creating an Entry
/// (spec.md §4.5 "Create").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegRequest {
    pub account_no: String,
    pub flag: DrCrFlag,
    pub currency: String,
    pub fcy_amount: Decimal,
    pub exchange_rate: Decimal,
    pub lcy_amount: Decimal,
    pub narration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub value_date: NaiveDate,
    pub narration: String,
    pub legs: Vec<LegRequest>,
}

/// One GL movement per posted leg (spec.md §3 "GL-Movement"). Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlMovement {
    pub tran_id: String,
    pub gl_num: String,
    pub dr_cr_flag: DrCrFlag,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub is_accrual: bool,
}

/// Result handed back to the caller of create/post/verify/reverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    pub base_tran_id: String,
    pub status: TranStatus,
    pub value_date: NaiveDate,
    pub tran_date: NaiveDate,
    pub narration: String,
    pub legs: Vec<TransactionLeg>,
}

/// One immutable history row written per leg on Verify (spec.md §3
/// "Transaction-History" / §4.5 "Verify").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnHistRow {
    pub tran_id: String,
    pub account_no: String,
    pub tran_date: NaiveDate,
    pub value_date: NaiveDate,
    pub dr_cr_flag: DrCrFlag,
    pub lcy_amount: Decimal,
    pub balance_after: Decimal,
    pub narration: String,
    pub created_at: DateTime<Utc>,
}
