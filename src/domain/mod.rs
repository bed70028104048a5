pub mod errors;
pub mod listing;
pub mod logging;
pub mod market;
pub mod news;
pub mod portfolio;
pub mod watchlist;
