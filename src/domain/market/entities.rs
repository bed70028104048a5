use super::value_objects::{AssetCategory, AssetId, MarketFilter, MarketSortField};
use crate::domain::listing::{Record, SortValue};
use serde::{Deserialize, Serialize};

/// One row of the markets table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAsset {
    pub id: AssetId,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub category: AssetCategory,
    pub price: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: Option<f64>,
    pub sparkline: Vec<f64>,
    pub is_watchlisted: bool,
}

impl MarketAsset {
    pub fn is_gainer(&self) -> bool {
        self.change_24h > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.change_24h < 0.0
    }
}

impl Record for MarketAsset {
    type Id = AssetId;
    type Filter = MarketFilter;
    type SortField = MarketSortField;

    fn id(&self) -> &AssetId {
        &self.id
    }

    fn matches_filter(&self, filter: &MarketFilter) -> bool {
        match filter {
            MarketFilter::All => true,
            MarketFilter::Gainers => self.is_gainer(),
            MarketFilter::Losers => self.is_loser(),
        }
    }

    fn sort_value(&self, field: MarketSortField) -> Option<SortValue<'_>> {
        let value = match field {
            MarketSortField::Rank => SortValue::Number(f64::from(self.rank)),
            MarketSortField::Name => SortValue::Text(&self.name),
            MarketSortField::Symbol => SortValue::Text(&self.symbol),
            MarketSortField::Price => SortValue::Number(self.price),
            MarketSortField::Change1h => SortValue::Number(self.change_1h),
            MarketSortField::Change24h => SortValue::Number(self.change_24h),
            MarketSortField::Change7d => SortValue::Number(self.change_7d),
            MarketSortField::MarketCap => SortValue::Number(self.market_cap),
            MarketSortField::Volume24h => SortValue::Number(self.volume_24h),
            MarketSortField::CirculatingSupply => SortValue::Number(self.circulating_supply),
        };
        Some(value)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.symbol]
    }
}
