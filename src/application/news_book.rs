use super::data_source::DataSource;
use crate::domain::errors::{AppError, DataResult};
use crate::domain::logging::LogComponent;
use crate::domain::news::{Article, carry_reader_state, toggle_like, trending_score};
use crate::log_debug;

/// Articles of the news page together with the reader's likes.
///
/// Every fetch pulls the whole feed again; likes made since the last fetch are carried over
/// onto the new snapshot, so the periodic refresh never forgets them.
pub struct NewsBook<S> {
    feed: S,
    clock: Box<dyn FnMut() -> u64>,
    articles: Vec<Article>,
}

impl<S: DataSource<Article>> NewsBook<S> {
    pub fn new(feed: S, clock: Box<dyn FnMut() -> u64>) -> Self {
        Self { feed, clock, articles: Vec::new() }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Likes or un-likes one article and returns the new flag.
    pub fn toggle_like(&mut self, id: u32) -> DataResult<bool> {
        let now = (self.clock)();
        let article = self
            .articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or_else(|| AppError::Validation(format!("Unknown article: {}", id)))?;
        let liked = toggle_like(article);
        article.trending_score = trending_score(article.likes, article.published_at, now);
        log_debug!(LogComponent::Application("NewsBook"), "article {} liked: {}", id, liked);
        Ok(liked)
    }
}

impl<S: DataSource<Article>> DataSource<Article> for NewsBook<S> {
    fn fetch(&mut self) -> DataResult<Vec<Article>> {
        let mut fresh = self.feed.fetch()?;
        carry_reader_state(&mut fresh, &self.articles, (self.clock)());
        self.articles = fresh;
        Ok(self.articles.clone())
    }
}
