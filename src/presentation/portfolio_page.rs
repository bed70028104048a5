use super::page_handle::{PageHandle, to_js_error, to_json};
use crate::application::{AsyncDataSource, PageController, PortfolioBook};
use crate::config::DashboardConfig;
use crate::domain::errors::AppError;
use crate::domain::listing::SortSpec;
use crate::domain::logging::LogComponent;
use crate::domain::portfolio::{
    HoldingFilter, HoldingSortField, Holding, PortfolioStats, Transaction, TransactionKind, allocation, to_csv,
};
use crate::infrastructure::{MockPortfolioSource, MockQuoteProvider, Notifier, Toast, ToastNotifier};
use crate::{log_info, log_warn};
use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type MockBook = PortfolioBook<MockPortfolioSource, MockQuoteProvider>;

/// Portfolio tracker: holdings table, buy/sell transactions, statistics and CSV export.
#[wasm_bindgen]
pub struct PortfolioPage {
    handle: PageHandle<Holding>,
    book: Rc<RefCell<MockBook>>,
}

#[wasm_bindgen]
impl PortfolioPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PortfolioPage {
        Self::assemble(DashboardConfig::default())
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<PortfolioPage, JsValue> {
        DashboardConfig::from_json(json).map(Self::assemble).map_err(to_js_error)
    }

    /// Loads the starting book on first call, re-prices the held coins afterwards.
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

    /// `all`, `profitable` or `losing`.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, key: &str) {
        self.handle.set_filter(HoldingFilter::from_key(key));
    }

    #[wasm_bindgen(js_name = setSort)]
    pub fn set_sort(&self, key: &str) -> bool {
        match SortSpec::<HoldingSortField>::parse(key) {
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

    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        to_json(&PortfolioStats::from_holdings(self.handle.controller().borrow().collection()))
    }

    #[wasm_bindgen(js_name = allocationJson)]
    pub fn allocation_json(&self) -> Result<String, JsValue> {
        to_json(&allocation(self.handle.controller().borrow().collection()))
    }

    /// `kind` is `buy` or `sell`. Invalid input rejects with the validation message and
    /// shows an error toast; the book is left unchanged.
    #[wasm_bindgen(js_name = addTransaction)]
    pub fn add_transaction(&self, kind: &str, symbol: &str, amount: f64, price: f64) -> Result<(), JsValue> {
        let result = kind
            .trim()
            .parse::<TransactionKind>()
            .map_err(|_| AppError::Validation(format!("Unknown transaction type: {}", kind)))
            .and_then(|kind| Transaction::new(kind, symbol, amount, price))
            .and_then(|transaction| self.book.borrow_mut().record(&transaction));

        match result {
            Ok(()) => {
                self.publish_book();
                self.toast(Toast::success("Transaction added successfully"));
                Ok(())
            }
            Err(error) => {
                self.handle.notifier().notify_error(&error);
                Err(to_js_error(error))
            }
        }
    }

    #[wasm_bindgen(js_name = removeHolding)]
    pub fn remove_holding(&self, symbol: &str) -> bool {
        let removed = self.book.borrow_mut().remove(symbol);
        if removed {
            self.publish_book();
            self.toast(Toast::success(format!("{} removed from portfolio", symbol)));
        }
        removed
    }

    /// The whole book as CSV text, independent of filter and paging.
    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> String {
        let csv = to_csv(self.handle.controller().borrow().collection());
        log_info!(LogComponent::Presentation("Portfolio"), "exported {} bytes of CSV", csv.len());
        csv
    }
}

impl PortfolioPage {
    fn assemble(config: DashboardConfig) -> PortfolioPage {
        let book = Rc::new(RefCell::new(PortfolioBook::new(
            MockPortfolioSource::browser(),
            MockQuoteProvider::browser(),
        )));
        let source: Rc<RefCell<dyn AsyncDataSource<Holding>>> = book.clone();
        let controller = PageController::<Holding>::new("Portfolio", config.page_size)
            .with_page_window(config.page_window);
        let notifier: Rc<dyn Notifier> = Rc::new(ToastNotifier::new(config.toast_duration_ms));

        PortfolioPage {
            handle: PageHandle::new("Portfolio", controller, source, notifier, config.portfolio_refresh_ms),
            book,
        }
    }

    /// Pushes the book into the table. Taking a ticket supersedes any refresh still in flight.
    fn publish_book(&self) {
        let holdings = self.book.borrow().holdings().to_vec();
        let mut controller = self.handle.controller().borrow_mut();
        let ticket = controller.begin_refresh();
        controller.complete_refresh(ticket, Ok(holdings));
    }

    fn toast(&self, toast: Toast) {
        if let Err(error) = self.handle.notifier().notify(toast) {
            log_warn!(LogComponent::Presentation("Portfolio"), "toast failed: {}", error);
        }
    }
}

impl Default for PortfolioPage {
    fn default() -> Self {
        Self::new()
    }
}
