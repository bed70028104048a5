//! Page orchestration: owns each page's collection and view state and talks to data sources.

pub mod data_source;
pub mod news_book;
pub mod page_controller;
pub mod portfolio_book;
pub mod refresh;

pub use data_source::*;
pub use news_book::*;
pub use page_controller::*;
pub use portfolio_book::*;
pub use refresh::*;
