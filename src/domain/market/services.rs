use super::entities::MarketAsset;
use crate::domain::watchlist::Watchlist;
use serde::Serialize;

/// Header statistics of the markets and dashboard pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub total_volume: f64,
    /// BTC market cap as a percentage of the total; 0 without BTC or without market cap.
    pub btc_dominance: f64,
    pub gainers: usize,
    pub losers: usize,
}

impl MarketOverview {
    pub fn from_assets(assets: &[MarketAsset]) -> Self {
        let total_market_cap: f64 = assets.iter().map(|a| a.market_cap).sum();
        let total_volume: f64 = assets.iter().map(|a| a.volume_24h).sum();
        let btc_dominance = match assets.iter().find(|a| a.symbol == "BTC") {
            Some(btc) if total_market_cap > 0.0 => btc.market_cap / total_market_cap * 100.0,
            _ => 0.0,
        };

        Self {
            total_market_cap,
            total_volume,
            btc_dominance,
            gainers: assets.iter().filter(|a| a.is_gainer()).count(),
            losers: assets.iter().filter(|a| a.is_loser()).count(),
        }
    }
}

/// Marks each asset that appears in the persisted watchlist. Run once per collection build.
pub fn annotate_watchlist(assets: &mut [MarketAsset], watchlist: &Watchlist) {
    for asset in assets.iter_mut() {
        asset.is_watchlisted = watchlist.contains(&asset.id);
    }
}

/// The first `count` assets in collection order (the "trending" sidebar).
pub fn top_assets(assets: &[MarketAsset], count: usize) -> &[MarketAsset] {
    &assets[..count.min(assets.len())]
}
