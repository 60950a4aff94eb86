use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::DrCrFlag;

/// One leg of an interest accrual (spec.md §3 "Interest-Accrual Leg"). Each
/// accrual produces exactly two legs with equal amounts; `accr_tran_id` is
/// `S<yyyymmdd><9-seq>-<1|2>`, exactly 20 characters (spec.md §4.8 step 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestAccrualLeg {
    pub accr_tran_id: String,
    pub account_no: String,
    pub gl_num: String,
    pub dr_cr_flag: DrCrFlag,
    pub amount: Decimal,
    pub accrual_date: NaiveDate,
    pub status: AccrualStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualStatus {
    Pending,
    Processed,
}

/// Build the 20-character accrual id: `S` + 8-digit date + 9-digit seq +
/// `-` + row (1 or 2). Fixed offsets: date at 2-9, seq at 10-18 (spec.md §9).
pub fn generate_accr_tran_id(date: NaiveDate, seq: u32, row: u8) -> String {
    debug_assert!((1..=999_999_999).contains(&seq));
    debug_assert!(row == 1 || row == 2);
    format!("S{}{:09}-{}", date.format("%Y%m%d"), seq, row)
}

/// Parse an accrual id back into (date, seq, row) using the fixed offsets
/// from spec.md §9, rather than delimiter-based splitting around the date.
pub fn parse_accr_tran_id(id: &str) -> Option<(NaiveDate, u32, u8)> {
    if id.len() != 20 || !id.starts_with('S') {
        return None;
    }
    let date = NaiveDate::parse_from_str(&id[1..9], "%Y%m%d").ok()?;
    let seq: u32 = id[9..18].parse().ok()?;
    if id.as_bytes()[18] != b'-' {
        return None;
    }
    let row: u8 = id[19..20].parse().ok()?;
    Some((date, seq, row))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualReport {
    pub accrual_date: NaiveDate,
    pub accounts_processed: i64,
    pub accounts_skipped: i64,
    pub errors: Vec<AccrualError>,
}

impl AccrualReport {
    pub fn new(accrual_date: NaiveDate) -> Self {
        Self {
            accrual_date,
            accounts_processed: 0,
            accounts_skipped: 0,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualError {
    pub account_no: String,
    pub message: String,
}
