use crate::domain::{
    errors::{AppError, DataResult},
    listing::{PageRange, Record, SortSpec, ViewState, clamp_page, compose_pipeline, page_window},
    logging::LogComponent,
};
use crate::application::data_source::DataSource;
use crate::{log_debug, log_warn};
use serde::Serialize;

/// Identifies one data-source request. Only the latest issued ticket may update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The collection was replaced with `records` new records.
    Applied { records: usize },
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The source failed; the previous collection is still in place.
    Failed(AppError),
}

/// Everything a renderer needs for one table or card list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<R> {
    pub rows: Vec<R>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Records left after filter and search.
    pub total_matches: usize,
    /// Size of the unfiltered collection.
    pub total_items: usize,
    pub range: PageRange,
    pub page_window: Vec<usize>,
}

/// Owns one page's collection and view state and re-derives the visible rows on demand.
pub struct PageController<R: Record> {
    name: &'static str,
    collection: Vec<R>,
    view: ViewState<R::Filter, R::SortField>,
    page_window: usize,
    latest_ticket: u64,
}

impl<R: Record> PageController<R> {
    pub fn new(name: &'static str, page_size: usize) -> Self {
        Self {
            name,
            collection: Vec::new(),
            view: ViewState::new(page_size.max(1)),
            page_window: 5,
            latest_ticket: 0,
        }
    }

    pub fn with_default_sort(mut self, sort: SortSpec<R::SortField>) -> Self {
        self.view.sort = Some(sort);
        self
    }

    pub fn with_page_window(mut self, buttons: usize) -> Self {
        self.page_window = buttons.max(1);
        self
    }

    pub fn collection(&self) -> &[R] {
        &self.collection
    }

    pub fn view_state(&self) -> &ViewState<R::Filter, R::SortField> {
        &self.view
    }

    pub fn current_page(&self) -> usize {
        self.view.page
    }

    pub fn total_pages(&self) -> usize {
        compose_pipeline(&self.collection, &self.view).total_pages
    }

    /// Replaces the whole collection and re-checks the page range.
    pub fn replace_collection(&mut self, records: Vec<R>) {
        self.collection = records;
        self.normalize_page();
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.collection.iter().find(|record| record.id() == id)
    }

    pub fn find_mut(&mut self, id: &R::Id) -> Option<&mut R> {
        self.collection.iter_mut().find(|record| record.id() == id)
    }

    /// Edits the collection in place (add/remove records), then re-checks the page range.
    pub fn update_collection<T>(&mut self, edit: impl FnOnce(&mut Vec<R>) -> T) -> T {
        let result = edit(&mut self.collection);
        self.normalize_page();
        result
    }

    /// Changing the filter starts over at page 1.
    pub fn set_filter(&mut self, filter: R::Filter) {
        log_debug!(LogComponent::Application(self.name), "filter -> {:?}", filter);
        self.view.filter = filter;
        self.view.page = 1;
    }

    /// `None` keeps collection order. The current page is kept.
    pub fn set_sort(&mut self, sort: Option<SortSpec<R::SortField>>) {
        log_debug!(LogComponent::Application(self.name), "sort -> {:?}", sort);
        self.view.sort = sort;
    }

    /// Changing the query starts over at page 1.
    pub fn set_query(&mut self, query: &str) {
        self.view.query = query.to_string();
        self.view.page = 1;
    }

    /// Moves to `page`, clamped into `[1, total_pages]`. Returns the page actually shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total_pages = self.total_pages();
        self.view.page = page.clamp(1, total_pages);
        self.view.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.view.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.view.page.saturating_sub(1))
    }

    fn normalize_page(&mut self) {
        let total_pages = self.total_pages();
        let page = clamp_page(self.view.page, total_pages);
        if page != self.view.page {
            log_debug!(
                LogComponent::Application(self.name),
                "page {} out of range (total {}), back to {}",
                self.view.page,
                total_pages,
                page
            );
            self.view.page = page;
        }
    }

    /// Starts a refresh; any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest_ticket += 1;
        RefreshTicket(self.latest_ticket)
    }

    pub fn complete_refresh(&mut self, ticket: RefreshTicket, result: DataResult<Vec<R>>) -> RefreshOutcome {
        if ticket.0 != self.latest_ticket {
            log_debug!(
                LogComponent::Application(self.name),
                "dropping response #{} (latest request is #{})",
                ticket.0,
                self.latest_ticket
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.replace_collection(records);
                RefreshOutcome::Applied { records: count }
            }
            Err(error) => {
                log_warn!(
                    LogComponent::Application(self.name),
                    "refresh failed, keeping {} records: {}",
                    self.collection.len(),
                    error
                );
                RefreshOutcome::Failed(error)
            }
        }
    }

    /// Synchronous fetch-and-apply.
    pub fn refresh<S: DataSource<R> + ?Sized>(&mut self, source: &mut S) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = source.fetch();
        self.complete_refresh(ticket, result)
    }
}

impl<R: Record + Clone> PageController<R> {
    /// Runs the full pipeline against the current collection and view state.
    pub fn view(&self) -> PageView<R> {
        let output = compose_pipeline(&self.collection, &self.view);
        PageView {
            rows: output.rows.into_iter().cloned().collect(),
            current_page: self.view.page,
            total_pages: output.total_pages,
            total_matches: output.total_matches,
            total_items: self.collection.len(),
            range: PageRange::new(self.view.page, self.view.page_size, output.total_matches),
            page_window: page_window(self.view.page, output.total_pages, self.page_window),
        }
    }
}
