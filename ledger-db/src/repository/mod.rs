pub mod account_repository;
pub mod balance_repository;
pub mod eod_repository;
pub mod gl_repository;
pub mod interest_accrual_repository;
pub mod transaction_history_repository;
pub mod transaction_repository;
pub mod unit_of_work;

pub use account_repository::*;
pub use balance_repository::*;
pub use eod_repository::*;
pub use gl_repository::*;
pub use interest_accrual_repository::*;
pub use transaction_history_repository::*;
pub use transaction_repository::*;
pub use unit_of_work::*;
