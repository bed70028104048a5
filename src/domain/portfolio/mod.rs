//! Portfolio tracker aggregate: holdings, transactions, statistics and export.

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::*;
