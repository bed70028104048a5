use super::entities::Article;
use serde::Serialize;

const MS_PER_HOUR: f64 = 3_600_000.0;
/// Articles younger than a minute score as if they were a minute old.
const MIN_AGE_HOURS: f64 = 1.0 / 60.0;

/// Popularity weighted by recency: likes per hour since publication.
pub fn trending_score(likes: u32, published_at: u64, now: u64) -> f64 {
    let age_hours = (now.saturating_sub(published_at) as f64 / MS_PER_HOUR).max(MIN_AGE_HOURS);
    f64::from(likes) / age_hours
}

/// Recomputes every article's trending score against one `now`.
pub fn refresh_trending_scores(articles: &mut [Article], now: u64) {
    for article in articles.iter_mut() {
        article.trending_score = trending_score(article.likes, article.published_at, now);
    }
}

/// Flips the like flag, keeps the counter in step, returns the new flag.
pub fn toggle_like(article: &mut Article) -> bool {
    article.is_liked = !article.is_liked;
    if article.is_liked {
        article.likes = article.likes.saturating_add(1);
    } else {
        article.likes = article.likes.saturating_sub(1);
    }
    article.is_liked
}

/// Confirmation shown after a like toggle.
pub fn like_message(liked: bool) -> &'static str {
    if liked { "Article liked!" } else { "Article unliked!" }
}

/// Re-applies the reader's likes from `previous` onto a freshly fetched feed.
///
/// The feed reports its own like counts; where the reader's flag differs from the feed's, the
/// flag wins and the count moves by one in the same direction. Scores are then recomputed.
pub fn carry_reader_state(fresh: &mut [Article], previous: &[Article], now: u64) {
    for article in fresh.iter_mut() {
        if let Some(known) = previous.iter().find(|known| known.id == article.id) {
            if known.is_liked != article.is_liked {
                toggle_like(article);
            }
        }
    }
    refresh_trending_scores(fresh, now);
}

/// Leading articles shown in the featured cards.
pub fn featured(articles: &[Article], count: usize) -> &[Article] {
    &articles[..count.min(articles.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSentiment {
    pub bullish: u8,
    pub neutral: u8,
    pub bearish: u8,
    /// 0..=100 gauge value.
    pub overall: u8,
}

impl MarketSentiment {
    pub fn label(&self) -> &'static str {
        if self.overall > 60 {
            "Bullish"
        } else if self.overall < 40 {
            "Bearish"
        } else {
            "Neutral"
        }
    }
}

impl Default for MarketSentiment {
    fn default() -> Self {
        Self { bullish: 58, neutral: 28, bearish: 14, overall: 72 }
    }
}
