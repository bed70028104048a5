use crate::application::{AsyncDataSource, PageController, RefreshOutcome, refresh_shared};
use crate::domain::errors::AppError;
use crate::domain::listing::Record;
use crate::domain::logging::LogComponent;
use crate::infrastructure::Notifier;
use crate::log_debug;
use gloo::timers::callback::Interval;
use js_sys::Promise;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

pub(crate) fn to_js_error(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|error| to_js_error(error.into()))
}

/// Turns a refresh outcome into a promise value; failures also raise an error toast.
fn settle(notifier: &dyn Notifier, outcome: RefreshOutcome) -> Result<JsValue, JsValue> {
    match outcome {
        RefreshOutcome::Applied { records } => Ok(JsValue::from(records as u32)),
        RefreshOutcome::Stale => Ok(JsValue::NULL),
        RefreshOutcome::Failed(error) => {
            notifier.notify_error(&error);
            Err(to_js_error(error))
        }
    }
}

/// Shared plumbing of every page object: controller, data source, notifier and refresh timer.
pub(crate) struct PageHandle<R: Record> {
    name: &'static str,
    controller: Rc<RefCell<PageController<R>>>,
    source: Rc<RefCell<dyn AsyncDataSource<R>>>,
    notifier: Rc<dyn Notifier>,
    refresh_ms: u32,
    timer: Option<Interval>,
}

impl<R: Record + Clone + Serialize + 'static> PageHandle<R> {
    pub fn new(
        name: &'static str,
        controller: PageController<R>,
        source: Rc<RefCell<dyn AsyncDataSource<R>>>,
        notifier: Rc<dyn Notifier>,
        refresh_ms: u32,
    ) -> Self {
        Self {
            name,
            controller: Rc::new(RefCell::new(controller)),
            source,
            notifier,
            refresh_ms,
            timer: None,
        }
    }

    pub fn controller(&self) -> &Rc<RefCell<PageController<R>>> {
        &self.controller
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Resolves with the number of loaded records, `null` for a superseded response,
    /// and rejects with the error text when the source failed.
    pub fn refresh(&self) -> Promise {
        let controller = self.controller.clone();
        let source = self.source.clone();
        let notifier = self.notifier.clone();
        future_to_promise(async move {
            let outcome = refresh_shared(&controller, &source).await;
            settle(notifier.as_ref(), outcome)
        })
    }

    /// Refreshes every `refresh_ms` until stopped or until the page object is dropped.
    pub fn start_auto_refresh(&mut self) {
        let controller = self.controller.clone();
        let source = self.source.clone();
        let notifier = self.notifier.clone();
        log_debug!(LogComponent::Presentation(self.name), "auto refresh every {} ms", self.refresh_ms);

        self.timer = Some(Interval::new(self.refresh_ms, move || {
            let controller = controller.clone();
            let source = source.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                let outcome = refresh_shared(&controller, &source).await;
                let _ = settle(notifier.as_ref(), outcome);
            });
        }));
    }

    pub fn stop_auto_refresh(&mut self) {
        self.timer = None;
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn view_json(&self) -> Result<String, JsValue> {
        to_json(&self.controller.borrow().view())
    }

    pub fn set_filter(&self, filter: R::Filter) {
        self.controller.borrow_mut().set_filter(filter);
    }

    pub fn set_query(&self, query: &str) {
        self.controller.borrow_mut().set_query(query);
    }

    pub fn go_to_page(&self, page: usize) -> usize {
        self.controller.borrow_mut().go_to_page(page)
    }

    pub fn next_page(&self) -> usize {
        self.controller.borrow_mut().next_page()
    }

    pub fn previous_page(&self) -> usize {
        self.controller.borrow_mut().previous_page()
    }
}
