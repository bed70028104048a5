//! Simulated data sources. Every random draw goes through an injected `FnMut() -> f64`
//! returning values in `[0, 1)`, so tests can pin the output.

use crate::application::DataSource;
use crate::domain::errors::{AppError, DataResult};
use crate::domain::market::{AssetCategory, AssetId, MarketAsset};
use crate::domain::news::{Article, NewsCategory, refresh_trending_scores};
use crate::domain::portfolio::{Holding, Quote, QuoteProvider, coin_name};
use crate::domain::logging::LogComponent;
use crate::log_debug;

pub type RandomSource = Box<dyn FnMut() -> f64>;
pub type Clock = Box<dyn FnMut() -> u64>;

fn browser_random() -> RandomSource {
    Box::new(js_sys::Math::random)
}

pub fn browser_clock() -> Clock {
    Box::new(|| js_sys::Date::now() as u64)
}

/// `value * (1 ± spread / 2)`.
fn jitter(random: &mut RandomSource, value: f64, spread: f64) -> f64 {
    value * (1.0 + (random() - 0.5) * spread)
}

/// Uniform draw in `[-half_range, half_range)`.
fn symmetric(random: &mut RandomSource, half_range: f64) -> f64 {
    (random() - 0.5) * 2.0 * half_range
}

/// Fails the fetch with probability `rate`.
fn simulate_outage(random: &mut RandomSource, rate: f64, what: &str) -> DataResult<()> {
    if rate > 0.0 && random() < rate {
        return Err(AppError::DataUnavailable(format!("{} feed did not respond", what)));
    }
    Ok(())
}

const MARKET_LISTINGS: [(&str, &str, &str, AssetCategory); 25] = [
    ("bitcoin", "Bitcoin", "BTC", AssetCategory::Layer1),
    ("ethereum", "Ethereum", "ETH", AssetCategory::Layer1),
    ("binancecoin", "BNB", "BNB", AssetCategory::Exchange),
    ("cardano", "Cardano", "ADA", AssetCategory::Layer1),
    ("solana", "Solana", "SOL", AssetCategory::Layer1),
    ("polkadot", "Polkadot", "DOT", AssetCategory::Layer1),
    ("dogecoin", "Dogecoin", "DOGE", AssetCategory::Meme),
    ("avalanche", "Avalanche", "AVAX", AssetCategory::Layer1),
    ("chainlink", "Chainlink", "LINK", AssetCategory::Oracle),
    ("polygon", "Polygon", "MATIC", AssetCategory::Layer2),
    ("uniswap", "Uniswap", "UNI", AssetCategory::Defi),
    ("litecoin", "Litecoin", "LTC", AssetCategory::Layer1),
    ("algorand", "Algorand", "ALGO", AssetCategory::Layer1),
    ("cosmos", "Cosmos", "ATOM", AssetCategory::Layer1),
    ("filecoin", "Filecoin", "FIL", AssetCategory::Storage),
    ("aave", "Aave", "AAVE", AssetCategory::Defi),
    ("compound", "Compound", "COMP", AssetCategory::Defi),
    ("maker", "Maker", "MKR", AssetCategory::Defi),
    ("sushi", "SushiSwap", "SUSHI", AssetCategory::Defi),
    ("pancakeswap", "PancakeSwap", "CAKE", AssetCategory::Defi),
    ("axie-infinity", "Axie Infinity", "AXS", AssetCategory::Gaming),
    ("sandbox", "The Sandbox", "SAND", AssetCategory::Gaming),
    ("decentraland", "Decentraland", "MANA", AssetCategory::Gaming),
    ("enjin", "Enjin Coin", "ENJ", AssetCategory::Gaming),
    ("chiliz", "Chiliz", "CHZ", AssetCategory::FanToken),
];

const DEFAULT_BASE_PRICE: f64 = 100.0;
const SPARKLINE_POINTS: usize = 24;
const BTC_MAX_SUPPLY: f64 = 21_000_000.0;

/// Reference price the markets feed jitters around.
pub fn market_base_price(symbol: &str) -> f64 {
    match symbol {
        "BTC" => 43_000.0,
        "ETH" => 2_400.0,
        "BNB" => 320.0,
        "ADA" => 0.85,
        "SOL" => 95.0,
        "DOT" => 12.0,
        "DOGE" => 0.18,
        "AVAX" => 45.0,
        "LINK" => 18.0,
        "MATIC" => 1.2,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Random walk starting at 100, never below 0.
fn sparkline(random: &mut RandomSource) -> Vec<f64> {
    let mut value = 100.0;
    (0..SPARKLINE_POINTS)
        .map(|_| {
            value = (value + (random() - 0.5) * 10.0).max(0.0);
            value
        })
        .collect()
}

/// Markets table feed: 25 listed assets with jittered prices, changes and supplies.
pub struct MockMarketSource {
    random: RandomSource,
    failure_rate: f64,
}

impl MockMarketSource {
    pub fn new(random: RandomSource) -> Self {
        Self { random, failure_rate: 0.0 }
    }

    pub fn browser() -> Self {
        Self::new(browser_random())
    }

    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    fn asset(&mut self, index: usize, listing: &(&str, &str, &str, AssetCategory)) -> MarketAsset {
        let (id, name, symbol, category) = *listing;
        let random = &mut self.random;
        let rank_cap = (1e12 / ((index + 1) as f64).powf(1.5)).max(1e9);

        MarketAsset {
            id: AssetId::from(id),
            rank: index as u32 + 1,
            name: name.to_string(),
            symbol: symbol.to_string(),
            category,
            price: jitter(random, market_base_price(symbol), 0.1),
            change_1h: symmetric(random, 2.0),
            change_24h: symmetric(random, 5.0),
            change_7d: symmetric(random, 15.0),
            market_cap: jitter(random, rank_cap, 0.2),
            volume_24h: random() * 1e10,
            circulating_supply: random() * 1e9,
            total_supply: random() * 1e9 * 1.2,
            max_supply: (symbol == "BTC").then_some(BTC_MAX_SUPPLY),
            sparkline: sparkline(random),
            is_watchlisted: false,
        }
    }
}

impl DataSource<MarketAsset> for MockMarketSource {
    fn fetch(&mut self) -> DataResult<Vec<MarketAsset>> {
        simulate_outage(&mut self.random, self.failure_rate, "Markets")?;
        let assets: Vec<MarketAsset> = MARKET_LISTINGS
            .iter()
            .enumerate()
            .map(|(index, listing)| self.asset(index, listing))
            .collect();
        log_debug!(LogComponent::Infrastructure("MockMarkets"), "generated {} assets", assets.len());
        Ok(assets)
    }
}

struct ArticleSeed {
    title: &'static str,
    summary: &'static str,
    content: &'static str,
    category: NewsCategory,
    source: &'static str,
    author: &'static str,
    image: &'static str,
    likes: u32,
    is_liked: bool,
    tags: [&'static str; 3],
}

const HOUR_MS: u64 = 3_600_000;
/// Article `n` was published `n * ARTICLE_SPACING_MS` ago.
const ARTICLE_SPACING_MS: u64 = 2 * HOUR_MS;

const ARTICLES: [ArticleSeed; 8] = [
    ArticleSeed {
        title: "Bitcoin Reaches New All-Time High Amid Institutional Adoption",
        summary: "Major financial institutions continue to add Bitcoin to their portfolios, driving unprecedented price levels and market confidence.",
        content: "Bitcoin has reached a new all-time high as institutional adoption continues to accelerate...",
        category: NewsCategory::Bitcoin,
        source: "CoinDesk",
        author: "Sarah Johnson",
        image: "https://images.pexels.com/photos/6771607/pexels-photo-6771607.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 245,
        is_liked: false,
        tags: ["bitcoin", "institutional", "ath"],
    },
    ArticleSeed {
        title: "Ethereum 2.0 Staking Rewards Increase Following Network Upgrade",
        summary: "The latest Ethereum network upgrade has resulted in improved staking rewards for validators, making the network more attractive.",
        content: "Ethereum validators are seeing higher staking rewards after the latest network upgrade...",
        category: NewsCategory::Ethereum,
        source: "Ethereum Foundation",
        author: "Vitalik Buterin",
        image: "https://images.pexels.com/photos/6801647/pexels-photo-6801647.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 189,
        is_liked: true,
        tags: ["ethereum", "staking", "upgrade"],
    },
    ArticleSeed {
        title: "DeFi Protocol Launches Revolutionary Yield Farming Mechanism",
        summary: "A new DeFi protocol has introduced an innovative yield farming mechanism that promises higher returns with lower risk.",
        content: "A new yield farming mechanism aims to balance returns and risk for liquidity providers...",
        category: NewsCategory::Defi,
        source: "DeFi Pulse",
        author: "Alex Thompson",
        image: "https://images.pexels.com/photos/6772076/pexels-photo-6772076.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 156,
        is_liked: false,
        tags: ["defi", "yield-farming", "innovation"],
    },
    ArticleSeed {
        title: "Major Exchange Announces Support for 50+ New Altcoins",
        summary: "Leading cryptocurrency exchange expands its offerings with support for over 50 new altcoins, increasing trading opportunities.",
        content: "Traders gain access to more than fifty additional altcoins as the exchange widens its listings...",
        category: NewsCategory::Altcoins,
        source: "Exchange News",
        author: "Michael Chen",
        image: "https://images.pexels.com/photos/6772078/pexels-photo-6772078.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 98,
        is_liked: false,
        tags: ["altcoins", "exchange", "trading"],
    },
    ArticleSeed {
        title: "Government Announces Comprehensive Crypto Regulation Framework",
        summary: "New regulatory framework aims to provide clarity for cryptocurrency businesses while protecting consumers.",
        content: "The proposed framework sets out licensing and disclosure rules for cryptocurrency businesses...",
        category: NewsCategory::Regulation,
        source: "Regulatory News",
        author: "Lisa Rodriguez",
        image: "https://images.pexels.com/photos/6772077/pexels-photo-6772077.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 234,
        is_liked: true,
        tags: ["regulation", "government", "framework"],
    },
    ArticleSeed {
        title: "NFT Marketplace Sees Record Trading Volume",
        summary: "Popular NFT marketplace reports record trading volume as digital art and collectibles gain mainstream adoption.",
        content: "Digital art and collectibles drove the marketplace to its busiest trading period yet...",
        category: NewsCategory::Nfts,
        source: "NFT Times",
        author: "Emma Wilson",
        image: "https://images.pexels.com/photos/6772073/pexels-photo-6772073.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 167,
        is_liked: false,
        tags: ["nft", "marketplace", "volume"],
    },
    ArticleSeed {
        title: "Blockchain Technology Revolutionizes Supply Chain Management",
        summary: "Major corporations adopt blockchain technology to improve transparency and efficiency in supply chain operations.",
        content: "Shared ledgers let suppliers and retailers trace goods from origin to shelf...",
        category: NewsCategory::Technology,
        source: "Tech Today",
        author: "David Park",
        image: "https://images.pexels.com/photos/6772074/pexels-photo-6772074.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 145,
        is_liked: false,
        tags: ["blockchain", "supply-chain", "technology"],
    },
    ArticleSeed {
        title: "Crypto Market Analysis: Bull Run Expected to Continue",
        summary: "Technical analysis suggests the current crypto bull run may continue for several more months based on market indicators.",
        content: "Momentum and on-chain indicators point to continued strength across major assets...",
        category: NewsCategory::MarketAnalysis,
        source: "Crypto Analytics",
        author: "Robert Kim",
        image: "https://images.pexels.com/photos/6772075/pexels-photo-6772075.jpeg?auto=compress&cs=tinysrgb&w=800",
        likes: 289,
        is_liked: true,
        tags: ["market-analysis", "bull-run", "prediction"],
    },
];

/// News feed: eight fixed articles published two hours apart, scored against the clock.
pub struct MockNewsSource {
    clock: Clock,
}

impl MockNewsSource {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn browser() -> Self {
        Self::new(browser_clock())
    }
}

impl DataSource<Article> for MockNewsSource {
    fn fetch(&mut self) -> DataResult<Vec<Article>> {
        let now = (self.clock)();
        let mut articles: Vec<Article> = ARTICLES
            .iter()
            .zip(1u32..)
            .map(|(seed, id)| Article {
                id,
                title: seed.title.to_string(),
                summary: seed.summary.to_string(),
                content: seed.content.to_string(),
                category: seed.category,
                source: seed.source.to_string(),
                author: seed.author.to_string(),
                published_at: now.saturating_sub(u64::from(id) * ARTICLE_SPACING_MS),
                image: seed.image.to_string(),
                likes: seed.likes,
                is_liked: seed.is_liked,
                tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
                trending_score: 0.0,
            })
            .collect();
        refresh_trending_scores(&mut articles, now);
        Ok(articles)
    }
}

/// `(symbol, amount, avg buy price)` of the starting book.
const STARTING_BOOK: [(&str, f64, f64); 8] = [
    ("BTC", 0.5, 40_000.0),
    ("ETH", 5.2, 2_200.0),
    ("ADA", 1_500.0, 0.75),
    ("SOL", 25.0, 80.0),
    ("DOT", 100.0, 15.0),
    ("LINK", 75.0, 20.0),
    ("MATIC", 2_000.0, 1.0),
    ("AVAX", 15.0, 35.0),
];

/// Reference price of the portfolio quotes, if the symbol is tracked there.
pub fn portfolio_base_price(symbol: &str) -> Option<f64> {
    match symbol {
        "BTC" => Some(43_256.78),
        "ETH" => Some(2_456.32),
        "ADA" => Some(0.87),
        "SOL" => Some(98.45),
        "DOT" => Some(12.89),
        "LINK" => Some(18.76),
        "MATIC" => Some(1.23),
        "AVAX" => Some(42.15),
        _ => None,
    }
}

/// Current prices for the portfolio: ±2.5 % around the reference price, ±5 % daily change.
/// Symbols that are only listed on the markets table fall back to their market base price.
pub struct MockQuoteProvider {
    random: RandomSource,
}

impl MockQuoteProvider {
    pub fn new(random: RandomSource) -> Self {
        Self { random }
    }

    pub fn browser() -> Self {
        Self::new(browser_random())
    }
}

impl QuoteProvider for MockQuoteProvider {
    fn quote(&mut self, symbol: &str) -> Option<Quote> {
        let base = portfolio_base_price(symbol).or_else(|| {
            MARKET_LISTINGS
                .iter()
                .find(|(_, _, listed, _)| *listed == symbol)
                .map(|_| market_base_price(symbol))
        })?;
        Some(Quote {
            price: jitter(&mut self.random, base, 0.05),
            change_24h: symmetric(&mut self.random, 5.0),
        })
    }
}

/// Initial holdings of the portfolio page, priced through [`MockQuoteProvider`].
pub struct MockPortfolioSource {
    quotes: MockQuoteProvider,
}

impl MockPortfolioSource {
    pub fn new(random: RandomSource) -> Self {
        Self { quotes: MockQuoteProvider::new(random) }
    }

    pub fn browser() -> Self {
        Self::new(browser_random())
    }
}

impl DataSource<Holding> for MockPortfolioSource {
    fn fetch(&mut self) -> DataResult<Vec<Holding>> {
        STARTING_BOOK
            .iter()
            .map(|&(symbol, amount, avg_buy_price)| {
                let quote = self
                    .quotes
                    .quote(symbol)
                    .ok_or_else(|| AppError::DataUnavailable(format!("no quote for {}", symbol)))?;
                Ok(Holding {
                    symbol: symbol.to_string(),
                    name: coin_name(symbol),
                    amount,
                    avg_buy_price,
                    current_price: quote.price,
                    change_24h: quote.change_24h,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f64) -> RandomSource {
        Box::new(move || value)
    }

    #[test]
    fn midpoint_draws_reproduce_base_prices() {
        let assets = MockMarketSource::new(constant(0.5)).fetch().unwrap();
        assert_eq!(assets.len(), 25);
        assert_eq!(assets[0].price, 43_000.0);
        assert_eq!(assets[0].change_24h, 0.0);
        assert_eq!(assets[0].max_supply, Some(21_000_000.0));
        assert_eq!(assets[1].max_supply, None);
        assert_eq!(assets[24].price, 100.0);
        assert!(assets.iter().all(|asset| asset.sparkline.len() == 24));
    }

    #[test]
    fn market_caps_follow_rank_power_law_with_floor() {
        let assets = MockMarketSource::new(constant(0.5)).fetch().unwrap();
        assert_eq!(assets[0].market_cap, 1e12);
        assert!(assets[1].market_cap < assets[0].market_cap);
        assert!(assets.iter().all(|asset| asset.market_cap >= 1e9));
    }

    #[test]
    fn change_ranges_are_respected() {
        let assets = MockMarketSource::new(constant(0.999_999)).fetch().unwrap();
        let asset = &assets[0];
        assert!(asset.change_1h < 2.0 && asset.change_1h > 1.99);
        assert!(asset.change_24h < 5.0);
        assert!(asset.change_7d < 15.0);
    }

    #[test]
    fn outage_is_reported_as_data_unavailable() {
        let mut source = MockMarketSource::new(constant(0.1)).with_failure_rate(0.5);
        assert!(matches!(source.fetch(), Err(AppError::DataUnavailable(_))));
    }

    #[test]
    fn articles_are_two_hours_apart_and_scored() {
        let now = 100 * HOUR_MS;
        let articles = MockNewsSource::new(Box::new(move || now)).fetch().unwrap();
        assert_eq!(articles.len(), 8);
        assert_eq!(articles[0].published_at, now - 2 * HOUR_MS);
        assert_eq!(articles[7].published_at, now - 16 * HOUR_MS);
        assert_eq!(articles[0].trending_score, 245.0 / 2.0);
        assert_eq!(articles.iter().filter(|a| a.is_liked).count(), 3);
    }

    #[test]
    fn starting_book_is_priced_from_quotes() {
        let holdings = MockPortfolioSource::new(constant(0.5)).fetch().unwrap();
        assert_eq!(holdings.len(), 8);
        assert_eq!(holdings[0].symbol, "BTC");
        assert_eq!(holdings[0].name, "Bitcoin");
        assert_eq!(holdings[0].current_price, 43_256.78);
    }

    #[test]
    fn quotes_cover_market_listings_but_not_unknown_symbols() {
        let mut quotes = MockQuoteProvider::new(constant(0.5));
        assert_eq!(quotes.quote("UNI").map(|q| q.price), Some(100.0));
        assert_eq!(quotes.quote("NOPE"), None);
    }
}
