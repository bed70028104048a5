//! Browser-facing adapters: console logging, mock data sources, localStorage and toasts.

pub mod mock_data;
pub mod notifications;
pub mod services;
pub mod storage;

pub use mock_data::*;
pub use notifications::*;
pub use services::*;
pub use storage::*;
