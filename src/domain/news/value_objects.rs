use crate::domain::listing::SortSpec;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum NewsCategory {
    Bitcoin,
    Ethereum,
    Defi,
    Altcoins,
    Regulation,
    Nfts,
    Technology,
    MarketAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsFilter {
    #[default]
    All,
    Category(NewsCategory),
}

impl NewsFilter {
    /// Accepts category keys as well as button captions ("Market Analysis", "All News").
    /// Anything unknown shows every article.
    pub fn from_key(key: &str) -> Self {
        let normalized = key.trim().to_lowercase().replace(' ', "-");
        match normalized.as_str() {
            "" | "all" | "all-news" => NewsFilter::All,
            other => other.parse().map(NewsFilter::Category).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NewsSortField {
    Title,
    PublishedAt,
    Likes,
    TrendingScore,
}

/// Sort selection of the news page: one of the `latest`/`popular`/`trending` presets
/// or a plain `<field>_<direction>` key.
pub fn news_sort_from_key(key: &str) -> Option<SortSpec<NewsSortField>> {
    match key.trim().to_lowercase().as_str() {
        "latest" => Some(SortSpec::desc(NewsSortField::PublishedAt)),
        "popular" => Some(SortSpec::desc(NewsSortField::Likes)),
        "trending" => Some(SortSpec::desc(NewsSortField::TrendingScore)),
        other => SortSpec::parse(other),
    }
}
