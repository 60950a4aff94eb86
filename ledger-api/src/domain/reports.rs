use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the Trial Balance CSV (spec.md §4.10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub gl_code: String,
    pub gl_name: String,
    pub opening_bal: Decimal,
    pub dr_summation: Decimal,
    pub cr_summation: Decimal,
    pub closing_bal: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    pub tran_date: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_dr: Decimal,
    pub total_cr: Decimal,
}

/// One liability/asset pair row in the Balance Sheet side-by-side layout
/// (spec.md §4.10); either side may be `None` when the columns are shorter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    pub liability: Option<BalanceSheetEntry>,
    pub asset: Option<BalanceSheetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetEntry {
    pub gl_code: String,
    pub gl_name: String,
    pub closing_bal: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    pub tran_date: NaiveDate,
    pub lines: Vec<BalanceSheetLine>,
    pub total_liabilities: Decimal,
    pub total_assets: Decimal,
}
