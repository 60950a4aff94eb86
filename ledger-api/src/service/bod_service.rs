use async_trait::async_trait;

use crate::domain::eod::BodSummary;
use crate::error::LedgerResult;

/// C11 — promotes future-dated transactions whose value date has arrived
/// into the current day (spec.md §4.11). A mid-run failure rolls back the
/// current leg but leaves earlier-in-run legs posted.
#[async_trait]
pub trait BodService: Send + Sync {
    async fn promote_future_dated(&self) -> LedgerResult<BodSummary>;
}
