mod account_repository_impl;
mod balance_repository_impl;
mod eod_repository_impl;
mod gl_repository_impl;
mod interest_accrual_repository_impl;
mod transaction_history_repository_impl;
mod transaction_repository_impl;
mod unit_of_work_impl;

pub use account_repository_impl::{AccountRepositoryImpl, AccountSeqRepositoryImpl};
pub use balance_repository_impl::BalanceRepositoryImpl;
pub use eod_repository_impl::{EodLogRepositoryImpl, ParameterRepositoryImpl};
pub use gl_repository_impl::GlRepositoryImpl;
pub use interest_accrual_repository_impl::InterestAccrualRepositoryImpl;
pub use transaction_history_repository_impl::TransactionHistoryRepositoryImpl;
pub use transaction_repository_impl::TransactionRepositoryImpl;
pub use unit_of_work_impl::PgUnitOfWork;
