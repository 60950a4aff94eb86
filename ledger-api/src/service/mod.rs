pub mod account_registry_service;
pub mod balance_service;
pub mod bod_service;
pub mod chart_of_accounts_service;
pub mod eod_service;
pub mod interest_accrual_service;
pub mod reports_service;
pub mod system_clock_service;
pub mod transaction_history_service;
pub mod transaction_service;

pub use account_registry_service::*;
pub use balance_service::*;
pub use bod_service::*;
pub use chart_of_accounts_service::*;
pub use eod_service::*;
pub use interest_accrual_service::*;
pub use reports_service::*;
pub use system_clock_service::*;
pub use transaction_history_service::*;
pub use transaction_service::*;
