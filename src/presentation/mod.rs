//! `wasm_bindgen` page objects. JS drives them with user events and renders `viewJson()`.

mod page_handle;

pub mod markets_page;
pub mod news_page;
pub mod portfolio_page;

pub use markets_page::MarketsPage;
pub use news_page::NewsPage;
pub use portfolio_page::PortfolioPage;
