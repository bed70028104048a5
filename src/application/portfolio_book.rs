use super::data_source::DataSource;
use crate::domain::errors::DataResult;
use crate::domain::logging::LogComponent;
use crate::domain::portfolio::{Holding, QuoteProvider, Transaction, apply_transaction, remove_holding, revalue};
use crate::log_info;

/// Authoritative holdings of the portfolio page.
///
/// The first fetch loads the starting book from `initial`; later fetches only re-price what is
/// held, so recorded transactions survive periodic refreshes.
pub struct PortfolioBook<S, Q> {
    initial: S,
    quotes: Q,
    holdings: Option<Vec<Holding>>,
}

impl<S: DataSource<Holding>, Q: QuoteProvider> PortfolioBook<S, Q> {
    pub fn new(initial: S, quotes: Q) -> Self {
        Self { initial, quotes, holdings: None }
    }

    /// Empty until the first successful fetch.
    pub fn holdings(&self) -> &[Holding] {
        self.holdings.as_deref().unwrap_or(&[])
    }

    fn ensure_loaded(&mut self) -> DataResult<()> {
        if self.holdings.is_none() {
            let holdings = self.initial.fetch()?;
            log_info!(LogComponent::Application("PortfolioBook"), "loaded {} holdings", holdings.len());
            self.holdings = Some(holdings);
        }
        Ok(())
    }

    /// Applies a buy or sell, loading the starting book first if needed.
    pub fn record(&mut self, transaction: &Transaction) -> DataResult<()> {
        self.ensure_loaded()?;
        let holdings = self.holdings.get_or_insert_with(Vec::new);
        apply_transaction(holdings, transaction, &mut self.quotes)?;
        log_info!(
            LogComponent::Application("PortfolioBook"),
            "{} {} {} @ {}",
            transaction.kind,
            transaction.amount,
            transaction.symbol,
            transaction.price
        );
        Ok(())
    }

    pub fn remove(&mut self, symbol: &str) -> bool {
        self.holdings.as_mut().is_some_and(|holdings| remove_holding(holdings, symbol))
    }
}

impl<S: DataSource<Holding>, Q: QuoteProvider> DataSource<Holding> for PortfolioBook<S, Q> {
    fn fetch(&mut self) -> DataResult<Vec<Holding>> {
        match self.holdings.as_mut() {
            Some(holdings) => revalue(holdings, &mut self.quotes),
            None => self.ensure_loaded()?,
        }
        Ok(self.holdings().to_vec())
    }
}
