//! Market assets aggregate: the markets table records, header statistics and price alerts.

pub mod alerts;
pub mod entities;
pub mod services;
pub mod value_objects;

pub use alerts::*;
pub use entities::*;
pub use services::*;
pub use value_objects::*;
