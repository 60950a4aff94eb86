use chrono::{DateTime, NaiveDate, Utc};
use ledger_api::domain::balance::{AccountBalanceRow, GlBalanceRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `Acct_Bal` row (spec.md §3/§6), keyed `(account_no, tran_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountBalanceModel {
    pub account_no: String,
    pub tran_date: NaiveDate,
    pub opening_bal: Decimal,
    pub dr_summation: Decimal,
    pub cr_summation: Decimal,
    pub closing_bal: Decimal,
    pub current_balance: Decimal,
    pub available_balance: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl From<AccountBalanceModel> for AccountBalanceRow {
    fn from(m: AccountBalanceModel) -> Self {
        AccountBalanceRow {
            account_no: m.account_no,
            tran_date: m.tran_date,
            opening_bal: m.opening_bal,
            dr_summation: m.dr_summation,
            cr_summation: m.cr_summation,
            closing_bal: m.closing_bal,
            current_balance: m.current_balance,
            available_balance: m.available_balance,
            last_updated: m.last_updated,
        }
    }
}

impl From<AccountBalanceRow> for AccountBalanceModel {
    fn from(d: AccountBalanceRow) -> Self {
        AccountBalanceModel {
            account_no: d.account_no,
            tran_date: d.tran_date,
            opening_bal: d.opening_bal,
            dr_summation: d.dr_summation,
            cr_summation: d.cr_summation,
            closing_bal: d.closing_bal,
            current_balance: d.current_balance,
            available_balance: d.available_balance,
            last_updated: d.last_updated,
        }
    }
}

/// `Acct_Bal_Accrual` row populated by EOD Job 6 (spec.md §4.9): the
/// per-account accrual balance snapshot, same shape as the daily balance row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountBalanceAccrualModel {
    pub account_no: String,
    pub tran_date: NaiveDate,
    pub accrued_dr: Decimal,
    pub accrued_cr: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// `GL_Balance` row (spec.md §3/§6), keyed `(gl_num, tran_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GlBalanceModel {
    pub gl_num: String,
    pub tran_date: NaiveDate,
    pub opening_bal: Decimal,
    pub dr_summation: Decimal,
    pub cr_summation: Decimal,
    pub closing_bal: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl From<GlBalanceModel> for GlBalanceRow {
    fn from(m: GlBalanceModel) -> Self {
        GlBalanceRow {
            gl_num: m.gl_num,
            tran_date: m.tran_date,
            opening_bal: m.opening_bal,
            dr_summation: m.dr_summation,
            cr_summation: m.cr_summation,
            closing_bal: m.closing_bal,
            last_updated: m.last_updated,
        }
    }
}

impl From<GlBalanceRow> for GlBalanceModel {
    fn from(d: GlBalanceRow) -> Self {
        GlBalanceModel {
            gl_num: d.gl_num,
            tran_date: d.tran_date,
            opening_bal: d.opening_bal,
            dr_summation: d.dr_summation,
            cr_summation: d.cr_summation,
            closing_bal: d.closing_bal,
            last_updated: d.last_updated,
        }
    }
}
