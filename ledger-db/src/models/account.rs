use chrono::NaiveDate;
use ledger_api::domain::account::{AccountInfo, AccountKind, AccountStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unified account row spanning `Cust_Acct_Master` and `OF_Acct_Master`
/// (spec.md §6), resolved to a single `accounts` table keyed by
/// `account_no` per the Open Question decision in SPEC_FULL.md §13.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountModel {
    pub account_no: String,
    pub is_customer: bool,
    pub customer_id: Option<String>,
    pub gl_num: String,
    pub sub_product_code: Option<String>,
    pub status: String,
    pub opening_date: NaiveDate,
    pub maturity_date: Option<NaiveDate>,
    pub closure_date: Option<NaiveDate>,
    pub loan_limit: Decimal,
    /// Rate fixed at opening for a liability Deal account (spec.md §4.8
    /// step 2); `None` for every other account.
    pub fixed_rate_at_opening: Option<Decimal>,
}

impl AccountModel {
    pub fn status(&self) -> AccountStatus {
        match self.status.as_str() {
            "Active" => AccountStatus::Active,
            "Inactive" => AccountStatus::Inactive,
            "Closed" => AccountStatus::Closed,
            _ => AccountStatus::Dormant,
        }
    }

    pub fn to_info(&self) -> AccountInfo {
        AccountInfo {
            account_no: self.account_no.clone(),
            kind: if self.is_customer { AccountKind::Customer } else { AccountKind::Office },
            gl_num: self.gl_num.clone(),
            status: self.status(),
            loan_limit: self.loan_limit,
            opening_date: self.opening_date,
            closure_date: self.closure_date,
        }
    }
}

/// `SubProd_Master` rows needed by interest accrual (spec.md §4.8): the
/// GL mapping for each leg and the interest-code/increment used to look up
/// the effective rate. Everything else about sub-products (maker-checker,
/// product catalog CRUD) is out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SubProductModel {
    pub sub_product_code: String,
    pub interest_code: Option<String>,
    pub interest_increment: Decimal,
    pub receivable_gl_num: Option<String>,
    pub income_gl_num: Option<String>,
    pub payable_gl_num: Option<String>,
    pub expenditure_gl_num: Option<String>,
}

/// `Intt_Rate_Master` row: the latest rate for an interest code effective
/// on or before a given date (spec.md §4.8 step 2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InterestRateModel {
    pub interest_code: String,
    pub effective_date: NaiveDate,
    pub interest_rate: Decimal,
}

/// `Account_Seq` row: a single-writer, per-GL sequence counter used to mint
/// office account numbers (spec.md §3, §5).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountSeqModel {
    pub gl_num: String,
    pub last_seq: i32,
}
