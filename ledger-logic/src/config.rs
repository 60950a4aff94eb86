use serde::{Deserialize, Serialize};

/// Layered configuration (defaults -> `config/*.toml` -> `LEDGER_*` env),
/// the way the teacher's services take injected configuration rather than
/// hardcoded constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// `System_Date` to seed the Parameter Table with when no row exists yet.
    pub default_system_date: Option<chrono::NaiveDate>,
    /// Directory financial reports are written under (`reports/<yyyymmdd>/`
    /// is relative to this).
    pub reports_dir: String,
    /// Bound on Transient-deadlock retries (spec.md §7).
    pub transient_retry_bound: u32,
    /// Day-count basis for interest accrual (spec.md §4.8 uses 365).
    pub interest_day_count_basis: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_system_date: None,
            reports_dir: "reports".to_string(),
            transient_retry_bound: 3,
            interest_day_count_basis: 365,
        }
    }
}

impl LedgerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&LedgerConfig::default())?)
            .add_source(config::File::with_name("config/ledger").required(false))
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?;
        settings.try_deserialize()
    }
}
