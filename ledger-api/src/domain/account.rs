use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::gl::{classify_gl_num, GlClass};

/// Account status (spec.md §3). Inactive/Closed/Dormant accounts reject all
/// transactions (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Closed,
    Dormant,
}

impl AccountStatus {
    pub fn is_transactable(self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// Unified account view (spec.md §4.3): a tagged variant distinguishing
/// customer from office accounts rather than class inheritance, per the
/// design note in spec.md §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Customer,
    Office,
}

/// A value snapshot returned by the Account Registry (spec.md §4.3);
/// callers never mutate the underlying record through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_no: String,
    pub kind: AccountKind,
    pub gl_num: String,
    pub status: AccountStatus,
    pub loan_limit: Decimal,
    pub opening_date: NaiveDate,
    pub closure_date: Option<NaiveDate>,
}

impl AccountInfo {
    pub fn is_customer(&self) -> bool {
        self.kind == AccountKind::Customer
    }

    /// Classifies this account's owning GL (spec.md §4.3's "balance sheet
    /// side" lookup), `None` when the `gl_num` prefix isn't one of the
    /// recognized balance-sheet leading digits.
    pub fn classify(&self) -> Option<GlClass> {
        classify_gl_num(&self.gl_num)
    }

    /// `true` when the account's owning GL begins with `2` (asset side),
    /// the overdraft/office-asset exemption used throughout spec.md §4.6.
    pub fn is_asset_gl(&self) -> bool {
        self.gl_num.starts_with('2')
    }

    pub fn is_liability_gl(&self) -> bool {
        self.gl_num.starts_with('1')
    }
}

/// `D` debits, `C` credits a leg (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrCrFlag {
    D,
    C,
}

impl DrCrFlag {
    pub fn flip(self) -> Self {
        match self {
            DrCrFlag::D => DrCrFlag::C,
            DrCrFlag::C => DrCrFlag::D,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrCrFlag::D => "D",
            DrCrFlag::C => "C",
        }
    }
}
