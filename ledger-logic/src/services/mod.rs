mod account_registry_service_impl;
mod balance_service_impl;
mod bod_service_impl;
mod chart_of_accounts_service_impl;
mod eod_service_impl;
mod interest_accrual_service_impl;
mod reports_service_impl;
mod system_clock_service_impl;
mod transaction_history_service_impl;
mod transaction_service_impl;

pub use account_registry_service_impl::AccountRegistryServiceImpl;
pub use balance_service_impl::{BalanceQueryServiceImpl, BalanceServiceImpl};
pub use bod_service_impl::BodServiceImpl;
pub use chart_of_accounts_service_impl::ChartOfAccountsServiceImpl;
pub use eod_service_impl::EodServiceImpl;
pub use interest_accrual_service_impl::InterestAccrualServiceImpl;
pub use reports_service_impl::ReportsServiceImpl;
pub use system_clock_service_impl::SystemClockServiceImpl;
pub use transaction_history_service_impl::TransactionHistoryServiceImpl;
pub use transaction_service_impl::TransactionServiceImpl;
