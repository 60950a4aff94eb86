pub mod account;
pub mod balance;
pub mod eod;
pub mod gl;
pub mod interest;
pub mod reports;
pub mod transaction;

pub use account::*;
pub use balance::*;
pub use eod::*;
pub use gl::*;
pub use interest::*;
pub use reports::*;
pub use transaction::*;
