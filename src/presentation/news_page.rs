use super::page_handle::{PageHandle, to_js_error, to_json};
use crate::application::{AsyncDataSource, NewsBook, PageController};
use crate::config::DashboardConfig;
use crate::domain::listing::SortSpec;
use crate::domain::logging::LogComponent;
use crate::domain::news::{Article, MarketSentiment, NewsFilter, NewsSortField, featured, like_message, news_sort_from_key};
use crate::infrastructure::{MockNewsSource, Notifier, Toast, ToastNotifier, browser_clock};
use crate::log_warn;
use js_sys::Promise;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SentimentView {
    #[serde(flatten)]
    sentiment: MarketSentiment,
    label: &'static str,
}

/// News feed: category filter, latest/popular/trending ordering, likes.
#[wasm_bindgen]
pub struct NewsPage {
    handle: PageHandle<Article>,
    book: Rc<RefCell<NewsBook<MockNewsSource>>>,
}

#[wasm_bindgen]
impl NewsPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NewsPage {
        Self::assemble(DashboardConfig::default())
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<NewsPage, JsValue> {
        DashboardConfig::from_json(json).map(Self::assemble).map_err(to_js_error)
    }

    pub fn refresh(&self) -> Promise {
        self.handle.refresh()
    }

    #[wasm_bindgen(js_name = startAutoRefresh)]
    pub fn start_auto_refresh(&mut self) {
        self.handle.start_auto_refresh();
    }

    #[wasm_bindgen(js_name = stopAutoRefresh)]
    pub fn stop_auto_refresh(&mut self) {
        self.handle.stop_auto_refresh();
    }

    #[wasm_bindgen(js_name = isAutoRefreshing)]
    pub fn is_auto_refreshing(&self) -> bool {
        self.handle.is_auto_refreshing()
    }

    /// Category key or button caption; unknown categories show every article.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, key: &str) {
        self.handle.set_filter(NewsFilter::from_key(key));
    }

    /// `latest`, `popular`, `trending` or a field key like `title_asc`.
    #[wasm_bindgen(js_name = setSort)]
    pub fn set_sort(&self, key: &str) -> bool {
        match news_sort_from_key(key) {
            Some(sort) => {
                self.handle.controller().borrow_mut().set_sort(Some(sort));
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = setSearch)]
    pub fn set_search(&self, query: &str) {
        self.handle.set_query(query);
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: usize) -> usize {
        self.handle.go_to_page(page)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) -> usize {
        self.handle.next_page()
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&self) -> usize {
        self.handle.previous_page()
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        self.handle.view_json()
    }

    #[wasm_bindgen(js_name = featuredJson)]
    pub fn featured_json(&self, count: usize) -> Result<String, JsValue> {
        to_json(&featured(self.handle.controller().borrow().collection(), count))
    }

    #[wasm_bindgen(js_name = sentimentJson)]
    pub fn sentiment_json(&self) -> Result<String, JsValue> {
        let sentiment = MarketSentiment::default();
        to_json(&SentimentView { sentiment, label: sentiment.label() })
    }

    /// Likes or un-likes an article and returns the new flag. Likes outlive refreshes.
    #[wasm_bindgen(js_name = toggleLike)]
    pub fn toggle_like(&self, id: u32) -> Result<bool, JsValue> {
        let liked = self.book.borrow_mut().toggle_like(id).map_err(to_js_error)?;
        self.publish_book();

        if let Err(error) = self.handle.notifier().notify(Toast::success(like_message(liked))) {
            log_warn!(LogComponent::Presentation("News"), "toast failed: {}", error);
        }
        Ok(liked)
    }
}

impl NewsPage {
    fn assemble(config: DashboardConfig) -> NewsPage {
        let book = Rc::new(RefCell::new(NewsBook::new(MockNewsSource::browser(), browser_clock())));
        let source: Rc<RefCell<dyn AsyncDataSource<Article>>> = book.clone();
        let controller = PageController::<Article>::new("News", config.page_size)
            .with_default_sort(SortSpec::desc(NewsSortField::PublishedAt))
            .with_page_window(config.page_window);
        let notifier: Rc<dyn Notifier> = Rc::new(ToastNotifier::new(config.toast_duration_ms));

        NewsPage {
            handle: PageHandle::new("News", controller, source, notifier, config.news_refresh_ms),
            book,
        }
    }

    /// Pushes the book into the list, superseding any refresh still in flight.
    fn publish_book(&self) {
        let articles = self.book.borrow().articles().to_vec();
        let mut controller = self.handle.controller().borrow_mut();
        let ticket = controller.begin_refresh();
        controller.complete_refresh(ticket, Ok(articles));
    }
}

impl Default for NewsPage {
    fn default() -> Self {
        Self::new()
    }
}
