use super::entities::MarketAsset;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

/// User-defined price threshold on one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub symbol: String,
    pub condition: AlertCondition,
    pub price: f64,
}

impl PriceAlert {
    pub fn new(symbol: impl Into<String>, condition: AlertCondition, price: f64) -> Self {
        Self { symbol: symbol.into().to_uppercase(), condition, price }
    }

    /// Bounds are inclusive.
    pub fn is_triggered_by(&self, asset: &MarketAsset) -> bool {
        if !asset.symbol.eq_ignore_ascii_case(&self.symbol) {
            return false;
        }
        match self.condition {
            AlertCondition::Above => asset.price >= self.price,
            AlertCondition::Below => asset.price <= self.price,
        }
    }

    pub fn message(&self, asset: &MarketAsset) -> String {
        format!("Price Alert: {} is {} ${}", asset.name, self.condition, self.price)
    }
}

/// Alerts whose condition holds for the current prices, paired with the matching asset.
pub fn triggered_alerts<'a>(
    alerts: &'a [PriceAlert],
    assets: &'a [MarketAsset],
) -> Vec<(&'a PriceAlert, &'a MarketAsset)> {
    assets
        .iter()
        .flat_map(|asset| {
            alerts
                .iter()
                .filter(move |alert| alert.is_triggered_by(asset))
                .map(move |alert| (alert, asset))
        })
        .collect()
}
