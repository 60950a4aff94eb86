use async_trait::async_trait;

use crate::domain::gl::{GlClass, GlSetup};
use crate::error::LedgerResult;

/// C2 — read-only chart of accounts (spec.md §4.2). Queries over the
/// (sub-product, account, GL) relational closure are pure functions here;
/// the repository layer materializes the closure.
#[async_trait]
pub trait ChartOfAccountsService: Send + Sync {
    async fn leaf(&self, gl_num: &str) -> LedgerResult<bool>;

    async fn classify(&self, gl_num: &str) -> LedgerResult<GlClass>;

    async fn is_overdraft_leaf(&self, gl_num: &str) -> LedgerResult<bool>;

    async fn is_interest_income_leaf(&self, gl_num: &str) -> LedgerResult<bool>;

    async fn is_interest_payable_leaf(&self, gl_num: &str) -> LedgerResult<bool>;

    /// GLs referenced by at least one sub-product with ≥ 1 open account.
    async fn active_gls(&self) -> LedgerResult<Vec<GlSetup>>;

    /// Active GLs whose prefix is `1` or `2`, plus interest GLs that are
    /// accrued balances regardless of prefix (spec.md §4.2).
    async fn balance_sheet_gls(&self) -> LedgerResult<Vec<GlSetup>>;

    async fn get(&self, gl_num: &str) -> LedgerResult<GlSetup>;
}
