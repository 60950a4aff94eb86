use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::LedgerResult;

/// C1 — the single authoritative business date. Every dated record in the
/// system obtains its date from here, never from the OS clock (spec.md §4.1).
#[async_trait]
pub trait SystemClockService: Send + Sync {
    /// The current `System_Date`. Fails with `SystemDateNotConfigured` when
    /// neither the parameter row nor a configured default is present.
    async fn now(&self) -> LedgerResult<NaiveDate>;

    /// `System_Date` at start-of-day, used wherever a component needs a
    /// timestamp rather than a date — never the wall clock.
    async fn now_timestamp(&self) -> LedgerResult<DateTime<Utc>>;

    /// Persist a new `System_Date`, stamping `updated_by` / `last_updated`.
    async fn set(&self, date: NaiveDate, user_id: &str) -> LedgerResult<()>;
}
