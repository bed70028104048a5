use super::value_objects::{NewsCategory, NewsFilter, NewsSortField};
use crate::domain::listing::{Record, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: NewsCategory,
    pub source: String,
    pub author: String,
    /// Milliseconds since the Unix epoch.
    pub published_at: u64,
    pub image: String,
    pub likes: u32,
    pub is_liked: bool,
    pub tags: Vec<String>,
    /// Likes per hour of age, refreshed with every collection build.
    pub trending_score: f64,
}

impl Record for Article {
    type Id = u32;
    type Filter = NewsFilter;
    type SortField = NewsSortField;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn matches_filter(&self, filter: &NewsFilter) -> bool {
        match filter {
            NewsFilter::All => true,
            NewsFilter::Category(category) => self.category == *category,
        }
    }

    fn sort_value(&self, field: NewsSortField) -> Option<SortValue<'_>> {
        let value = match field {
            NewsSortField::Title => SortValue::Text(&self.title),
            NewsSortField::PublishedAt => SortValue::Number(self.published_at as f64),
            NewsSortField::Likes => SortValue::Number(f64::from(self.likes)),
            NewsSortField::TrendingScore => SortValue::Number(self.trending_score),
        };
        Some(value)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.summary]
    }
}
