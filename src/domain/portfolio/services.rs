use super::entities::{Holding, Transaction, TransactionKind};
use crate::domain::errors::{AppError, DataResult};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

static COIN_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("BTC", "Bitcoin"),
        ("ETH", "Ethereum"),
        ("ADA", "Cardano"),
        ("SOL", "Solana"),
        ("DOT", "Polkadot"),
        ("LINK", "Chainlink"),
        ("MATIC", "Polygon"),
        ("AVAX", "Avalanche"),
    ])
});

/// Display name of a symbol; unknown symbols name themselves.
pub fn coin_name(symbol: &str) -> String {
    COIN_NAMES.get(symbol).map(|name| name.to_string()).unwrap_or_else(|| symbol.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub change_24h: f64,
}

/// Source of current prices for held coins.
pub trait QuoteProvider {
    fn quote(&mut self, symbol: &str) -> Option<Quote>;
}

/// Applies a buy or sell to the book.
///
/// A buy on a held coin re-weights the average buy price; a buy on a new coin opens a
/// holding priced from `quotes` (falling back to the transaction price). A sell reduces the
/// amount, never below zero, and emptied holdings are dropped.
pub fn apply_transaction<Q: QuoteProvider + ?Sized>(
    holdings: &mut Vec<Holding>,
    transaction: &Transaction,
    quotes: &mut Q,
) -> DataResult<()> {
    match (holdings.iter_mut().find(|h| h.symbol == transaction.symbol), transaction.kind) {
        (Some(holding), TransactionKind::Buy) => {
            let total_cost = holding.total_cost() + transaction.amount * transaction.price;
            let total_amount = holding.amount + transaction.amount;
            holding.avg_buy_price = total_cost / total_amount;
            holding.amount = total_amount;
        }
        (Some(holding), TransactionKind::Sell) => {
            holding.amount = (holding.amount - transaction.amount).max(0.0);
        }
        (None, TransactionKind::Buy) => {
            let quote = quotes
                .quote(&transaction.symbol)
                .unwrap_or(Quote { price: transaction.price, change_24h: 0.0 });
            holdings.push(Holding {
                symbol: transaction.symbol.clone(),
                name: coin_name(&transaction.symbol),
                amount: transaction.amount,
                avg_buy_price: transaction.price,
                current_price: quote.price,
                change_24h: quote.change_24h,
            });
        }
        (None, TransactionKind::Sell) => {
            return Err(AppError::Validation(format!(
                "Cannot sell {}: not in portfolio",
                transaction.symbol
            )));
        }
    }

    holdings.retain(|h| h.amount > 0.0);
    Ok(())
}

/// Returns `false` when nothing was held under `symbol`.
pub fn remove_holding(holdings: &mut Vec<Holding>, symbol: &str) -> bool {
    let before = holdings.len();
    holdings.retain(|h| h.symbol != symbol);
    before != holdings.len()
}

/// Pulls fresh prices; holdings without a quote keep their last price.
pub fn revalue<Q: QuoteProvider + ?Sized>(holdings: &mut [Holding], quotes: &mut Q) {
    for holding in holdings.iter_mut() {
        if let Some(quote) = quotes.quote(&holding.symbol) {
            holding.current_price = quote.price;
            holding.change_24h = quote.change_24h;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_pnl: f64,
    pub total_pnl_percent: f64,
    pub coin_count: usize,
    /// Symbol with the highest P&L percentage.
    pub best_performer: Option<String>,
}

impl PortfolioStats {
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let total_value: f64 = holdings.iter().map(Holding::market_value).sum();
        let total_cost: f64 = holdings.iter().map(Holding::total_cost).sum();
        let total_pnl = total_value - total_cost;
        let total_pnl_percent = if total_cost == 0.0 { 0.0 } else { total_pnl / total_cost * 100.0 };
        let best_performer = holdings
            .iter()
            .reduce(|best, current| if current.pnl_percent() > best.pnl_percent() { current } else { best })
            .map(|h| h.symbol.clone());

        Self {
            total_value,
            total_cost,
            total_pnl,
            total_pnl_percent,
            coin_count: holdings.len(),
            best_performer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub symbol: String,
    pub percent: f64,
}

/// Share of total market value per holding, in collection order.
pub fn allocation(holdings: &[Holding]) -> Vec<AllocationSlice> {
    let total: f64 = holdings.iter().map(Holding::market_value).sum();
    holdings
        .iter()
        .map(|h| AllocationSlice {
            symbol: h.symbol.clone(),
            percent: if total == 0.0 { 0.0 } else { h.market_value() / total * 100.0 },
        })
        .collect()
}

const CSV_HEADER: &str = "Symbol,Name,Amount,Avg Buy Price,Current Price,Market Value,P&L,P&L %";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Export of the whole book, one line per holding.
pub fn to_csv(holdings: &[Holding]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(holdings.iter().map(|h| {
        format!(
            "{},{},{},{},{},{},{},{}",
            csv_field(&h.symbol),
            csv_field(&h.name),
            h.amount,
            h.avg_buy_price,
            h.current_price,
            h.market_value(),
            h.pnl(),
            h.pnl_percent()
        )
    }));
    lines.join("\n")
}
