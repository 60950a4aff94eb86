use async_trait::async_trait;
use ledger_api::error::LedgerResult;

use crate::models::gl::GlSetupModel;

#[async_trait]
pub trait GlRepository: Send + Sync {
    async fn find_by_num(&self, gl_num: &str) -> LedgerResult<Option<GlSetupModel>>;

    async fn find_children(&self, parent_gl_num: &str) -> LedgerResult<Vec<GlSetupModel>>;

    /// GLs referenced by at least one sub-product with >= 1 open account
    /// (spec.md §4.2 "active GLs").
    async fn find_active(&self) -> LedgerResult<Vec<GlSetupModel>>;

    async fn insert(&self, gl: GlSetupModel) -> LedgerResult<GlSetupModel>;
}
