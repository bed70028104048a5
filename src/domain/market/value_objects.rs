use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Stable asset identifier such as `bitcoin` or `axie-infinity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Deref, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Sector tag carried by each market asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AssetCategory {
    #[strum(serialize = "layer-1")]
    #[serde(rename = "layer-1")]
    Layer1,
    #[strum(serialize = "layer-2")]
    #[serde(rename = "layer-2")]
    Layer2,
    Exchange,
    Meme,
    Oracle,
    Defi,
    Storage,
    Gaming,
    FanToken,
}

/// Filter buttons of the markets table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarketFilter {
    #[default]
    All,
    /// `change_24h > 0`
    Gainers,
    /// `change_24h < 0`
    Losers,
}

impl MarketFilter {
    /// Unknown keys fall back to `All`.
    pub fn from_key(key: &str) -> Self {
        key.trim().parse().unwrap_or_default()
    }
}

/// Columns the markets table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MarketSortField {
    Rank,
    Name,
    Symbol,
    Price,
    #[strum(to_string = "change_1h", serialize = "change1h")]
    Change1h,
    #[strum(to_string = "change_24h", serialize = "change24h")]
    Change24h,
    #[strum(to_string = "change_7d", serialize = "change7d")]
    Change7d,
    #[strum(to_string = "market_cap", serialize = "marketcap")]
    MarketCap,
    #[strum(to_string = "volume_24h", serialize = "volume", serialize = "volume24h")]
    Volume24h,
    CirculatingSupply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keys_are_permissive() {
        assert_eq!(MarketFilter::from_key("gainers"), MarketFilter::Gainers);
        assert_eq!(MarketFilter::from_key("Losers"), MarketFilter::Losers);
        assert_eq!(MarketFilter::from_key("trending"), MarketFilter::All);
    }

    #[test]
    fn sort_field_aliases() {
        assert_eq!("market_cap".parse::<MarketSortField>(), Ok(MarketSortField::MarketCap));
        assert_eq!("change24h".parse::<MarketSortField>(), Ok(MarketSortField::Change24h));
        assert_eq!(MarketSortField::Change24h.to_string(), "change_24h");
    }

    #[test]
    fn category_round_trips_through_its_key() {
        assert_eq!("fan-token".parse::<AssetCategory>(), Ok(AssetCategory::FanToken));
        assert_eq!(AssetCategory::Layer1.as_ref(), "layer-1");
    }
}
