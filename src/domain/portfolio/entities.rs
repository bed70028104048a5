use crate::domain::errors::{AppError, DataResult};
use crate::domain::listing::{Record, SortValue};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Position in one coin. Value and P&L figures are derived from the stored fields and
/// serialized alongside them for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", into = "HoldingRow")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub avg_buy_price: f64,
    pub current_price: f64,
    pub change_24h: f64,
}

/// Serialized form of a [`Holding`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HoldingRow {
    symbol: String,
    name: String,
    amount: f64,
    avg_buy_price: f64,
    current_price: f64,
    change_24h: f64,
    market_value: f64,
    total_cost: f64,
    pnl: f64,
    pnl_percent: f64,
}

impl From<Holding> for HoldingRow {
    fn from(holding: Holding) -> Self {
        Self {
            market_value: holding.market_value(),
            total_cost: holding.total_cost(),
            pnl: holding.pnl(),
            pnl_percent: holding.pnl_percent(),
            symbol: holding.symbol,
            name: holding.name,
            amount: holding.amount,
            avg_buy_price: holding.avg_buy_price,
            current_price: holding.current_price,
            change_24h: holding.change_24h,
        }
    }
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.amount * self.current_price
    }

    pub fn total_cost(&self) -> f64 {
        self.amount * self.avg_buy_price
    }

    pub fn pnl(&self) -> f64 {
        self.market_value() - self.total_cost()
    }

    /// 0 when nothing was paid.
    pub fn pnl_percent(&self) -> f64 {
        let cost = self.total_cost();
        if cost == 0.0 { 0.0 } else { self.pnl() / cost * 100.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HoldingFilter {
    #[default]
    All,
    /// `pnl > 0`
    Profitable,
    /// `pnl < 0`
    Losing,
}

impl HoldingFilter {
    pub fn from_key(key: &str) -> Self {
        key.trim().parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HoldingSortField {
    Symbol,
    Name,
    Amount,
    AvgBuyPrice,
    CurrentPrice,
    #[strum(to_string = "market_value", serialize = "value")]
    MarketValue,
    Pnl,
    PnlPercent,
    #[strum(to_string = "change_24h", serialize = "change24h")]
    Change24h,
}

impl Record for Holding {
    type Id = String;
    type Filter = HoldingFilter;
    type SortField = HoldingSortField;

    fn id(&self) -> &String {
        &self.symbol
    }

    fn matches_filter(&self, filter: &HoldingFilter) -> bool {
        match filter {
            HoldingFilter::All => true,
            HoldingFilter::Profitable => self.pnl() > 0.0,
            HoldingFilter::Losing => self.pnl() < 0.0,
        }
    }

    fn sort_value(&self, field: HoldingSortField) -> Option<SortValue<'_>> {
        let value = match field {
            HoldingSortField::Symbol => SortValue::Text(&self.symbol),
            HoldingSortField::Name => SortValue::Text(&self.name),
            HoldingSortField::Amount => SortValue::Number(self.amount),
            HoldingSortField::AvgBuyPrice => SortValue::Number(self.avg_buy_price),
            HoldingSortField::CurrentPrice => SortValue::Number(self.current_price),
            HoldingSortField::MarketValue => SortValue::Number(self.market_value()),
            HoldingSortField::Pnl => SortValue::Number(self.pnl()),
            HoldingSortField::PnlPercent => SortValue::Number(self.pnl_percent()),
            HoldingSortField::Change24h => SortValue::Number(self.change_24h),
        };
        Some(value)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.symbol]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub symbol: String,
    pub amount: f64,
    pub price: f64,
}

impl Transaction {
    /// Validated constructor; the symbol is upper-cased.
    pub fn new(kind: TransactionKind, symbol: &str, amount: f64, price: f64) -> DataResult<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::Validation("Symbol cannot be empty".to_string()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::Validation(format!("Invalid amount: {}", amount)));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::Validation(format!("Invalid price: {}", price)));
        }
        Ok(Self { kind, symbol, amount, price })
    }
}
