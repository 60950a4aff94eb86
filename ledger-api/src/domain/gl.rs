use serde::{Deserialize, Serialize};

/// A node in the chart of accounts (spec.md §3 "GL Setup"). Layer 1 is the
/// root, layer 4 is the leaf layer accounts are permitted to reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlSetup {
    pub gl_num: String,
    pub gl_name: String,
    pub layer_id: u8,
    pub parent_gl_num: Option<String>,
    pub layer_gl_num: String,
    /// `true` for leaves specifically flagged to tolerate a debit-driven
    /// negative balance (spec.md §3 "overdraft leaves").
    pub is_overdraft: bool,
}

/// Classification derived from a GL's leading digits (spec.md §3/§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlClass {
    Liability,
    Asset,
    InterestExpenditure,
    InterestIncome,
    InterestPayable,
    InterestReceivable,
}

impl GlClass {
    /// `true` for classes that grow the balance on credit (spec.md §4.4
    /// sign convention): Liability and Income-like classes.
    pub fn grows_on_credit(self) -> bool {
        matches!(
            self,
            GlClass::Liability | GlClass::InterestIncome | GlClass::InterestPayable
        )
    }

    /// Balance-sheet side this class is reported under (spec.md §4.10):
    /// interest-income/receivable leaves sit on the asset side,
    /// interest-expenditure/payable leaves sit on the liability side.
    pub fn balance_sheet_side(self) -> BalanceSheetSide {
        match self {
            GlClass::Liability | GlClass::InterestExpenditure | GlClass::InterestPayable => {
                BalanceSheetSide::Liability
            }
            GlClass::Asset | GlClass::InterestIncome | GlClass::InterestReceivable => {
                BalanceSheetSide::Asset
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSheetSide {
    Liability,
    Asset,
}

/// Classify a `gl_num` from its leading 1-4 characters per spec.md §3:
/// `1` → Liability, `2` → Asset, `14` → InterestExpenditure,
/// `24` → InterestIncome, `13` → InterestPayable, `23` → InterestReceivable.
pub fn classify_gl_num(gl_num: &str) -> Option<GlClass> {
    if gl_num.starts_with("14") {
        return Some(GlClass::InterestExpenditure);
    }
    if gl_num.starts_with("24") {
        return Some(GlClass::InterestIncome);
    }
    if gl_num.starts_with("13") {
        return Some(GlClass::InterestPayable);
    }
    if gl_num.starts_with("23") {
        return Some(GlClass::InterestReceivable);
    }
    if gl_num.starts_with('1') {
        return Some(GlClass::Liability);
    }
    if gl_num.starts_with('2') {
        return Some(GlClass::Asset);
    }
    None
}

/// `Deal` accounts (term-deposit / term-loan style) are identified by a
/// `1102`/`2102` leaf prefix (spec.md §4.8 step 1); everything else is
/// `Running` (everyday savings/current style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountBookType {
    Deal,
    Running,
}

pub fn book_type_for_gl(gl_num: &str) -> AccountBookType {
    if gl_num.starts_with("1102") || gl_num.starts_with("2102") {
        AccountBookType::Deal
    } else {
        AccountBookType::Running
    }
}
