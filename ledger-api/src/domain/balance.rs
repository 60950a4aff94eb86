use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-account daily balance row (spec.md §3 "Account-Balance Row"), keyed
/// by `(account_no, tran_date)`. DR/CR are non-negative magnitudes; callers
/// interpret the sign via the owning GL's class (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceRow {
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

impl AccountBalanceRow {
    pub fn new_zero(account_no: impl Into<String>, tran_date: NaiveDate, opening_bal: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            account_no: account_no.into(),
            tran_date,
            opening_bal,
            dr_summation: Decimal::ZERO,
            cr_summation: Decimal::ZERO,
            closing_bal: opening_bal,
            current_balance: opening_bal,
            available_balance: opening_bal,
            last_updated: now,
        }
    }

    /// `closingBal = openingBal + crSummation - drSummation` (spec.md §3/§4.4 invariant).
    pub fn recompute_closing(&mut self) {
        self.closing_bal = self.opening_bal + self.cr_summation - self.dr_summation;
    }

    pub fn invariant_holds(&self) -> bool {
        self.closing_bal == self.opening_bal + self.cr_summation - self.dr_summation
    }
}

/// Per-GL daily balance row (spec.md §3 "GL-Balance Row"), same shape as the
/// account row, keyed by `(gl_num, tran_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlBalanceRow {
    pub gl_num: String,
    pub tran_date: NaiveDate,
    pub opening_bal: Decimal,
    pub dr_summation: Decimal,
    pub cr_summation: Decimal,
    pub closing_bal: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl GlBalanceRow {
    pub fn new_zero(gl_num: impl Into<String>, tran_date: NaiveDate, opening_bal: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            gl_num: gl_num.into(),
            tran_date,
            opening_bal,
            dr_summation: Decimal::ZERO,
            cr_summation: Decimal::ZERO,
            closing_bal: opening_bal,
            last_updated: now,
        }
    }

    pub fn recompute_closing(&mut self) {
        self.closing_bal = self.opening_bal + self.cr_summation - self.dr_summation;
    }
}
