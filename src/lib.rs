use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod application;
pub mod config;
pub mod domain;
pub mod formatting;
pub mod infrastructure;
pub mod presentation;

/// Installs the panic hook, console logger and browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    });
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    crate::log_info!(LogComponent::Presentation("Initialize"), "dashboard ready");
}

/// `43,256.78` style price text for the renderer.
#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(price: f64) -> String {
    formatting::format_price(price)
}

#[wasm_bindgen(js_name = formatLargeNumber)]
pub fn format_large_number(value: f64) -> String {
    formatting::format_large_number(value)
}

#[wasm_bindgen(js_name = formatPercentChange)]
pub fn format_percent_change(change: f64) -> String {
    formatting::format_percent_change(change)
}

/// `up` or `down`, for the arrow next to a percent change.
#[wasm_bindgen(js_name = trendDirection)]
pub fn trend_direction(change: f64) -> String {
    formatting::trend_direction(change).to_string()
}

#[wasm_bindgen(js_name = formatSignedPercent)]
pub fn format_signed_percent(value: f64) -> String {
    formatting::format_signed_percent(value)
}

/// P&L text such as `+$12.50`.
#[wasm_bindgen(js_name = formatSignedCurrency)]
pub fn format_signed_currency(value: f64) -> String {
    formatting::format_signed_currency(value)
}

#[wasm_bindgen(js_name = formatAmount)]
pub fn format_amount(amount: f64) -> String {
    formatting::format_amount(amount)
}

/// Like and view counters; negative or fractional input is truncated to a whole count.
#[wasm_bindgen(js_name = formatCount)]
pub fn format_count(count: f64) -> String {
    formatting::format_count(count.max(0.0) as u64)
}

/// Relative age such as `2 hours ago` of a millisecond timestamp.
#[wasm_bindgen(js_name = timeAgo)]
pub fn time_ago(timestamp: f64) -> String {
    formatting::time_ago(timestamp as u64, js_sys::Date::now() as u64)
}
