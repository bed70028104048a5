use cryptohub_dashboard::application::{
    AsyncDataSource, DataSource, PageController, RefreshOutcome, refresh_shared,
};
use cryptohub_dashboard::domain::errors::{AppError, DataResult};
use cryptohub_dashboard::domain::market::{MarketAsset, annotate_watchlist};
use cryptohub_dashboard::domain::portfolio::Holding;
use cryptohub_dashboard::domain::watchlist::{WatchlistStore, toggle_in_store};
use cryptohub_dashboard::infrastructure::{MemoryWatchlistStore, MockMarketSource, MockPortfolioSource};
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

fn holding(symbol: &str) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        amount: 1.0,
        avg_buy_price: 1.0,
        current_price: 1.0,
        change_24h: 0.0,
    }
}

/// Replays a fixed script of responses.
struct Scripted(VecDeque<DataResult<Vec<Holding>>>);

impl DataSource<Holding> for Scripted {
    fn fetch(&mut self) -> DataResult<Vec<Holding>> {
        self.0
            .pop_front()
            .unwrap_or_else(|| Err(AppError::DataUnavailable("script exhausted".to_string())))
    }
}

/// Each request waits for a response sent through the matching channel.
struct Deferred(VecDeque<oneshot::Receiver<DataResult<Vec<Holding>>>>);

impl AsyncDataSource<Holding> for Deferred {
    fn fetch_async(&mut self) -> LocalBoxFuture<'static, DataResult<Vec<Holding>>> {
        let pending = self.0.pop_front();
        Box::pin(async move {
            match pending {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(AppError::DataUnavailable("request dropped".to_string()))),
                None => Err(AppError::DataUnavailable("no request expected".to_string())),
            }
        })
    }
}

#[test]
fn failed_refresh_keeps_previous_collection() {
    let mut source = Scripted(VecDeque::from([
        Ok(vec![holding("BTC"), holding("ETH")]),
        Err(AppError::DataUnavailable("timeout".to_string())),
    ]));
    let mut controller = PageController::<Holding>::new("Portfolio", 50);

    assert_eq!(controller.refresh(&mut source), RefreshOutcome::Applied { records: 2 });
    let outcome = controller.refresh(&mut source);

    assert_eq!(outcome, RefreshOutcome::Failed(AppError::DataUnavailable("timeout".to_string())));
    assert_eq!(controller.collection().len(), 2);
}

#[test]
fn only_latest_ticket_is_applied() {
    let mut controller = PageController::<Holding>::new("Portfolio", 50);
    let first = controller.begin_refresh();
    let second = controller.begin_refresh();
    assert!(second > first);

    assert_eq!(controller.complete_refresh(second, Ok(vec![holding("NEW")])), RefreshOutcome::Applied { records: 1 });
    assert_eq!(controller.complete_refresh(first, Ok(vec![holding("OLD"), holding("OLDER")])), RefreshOutcome::Stale);
    assert_eq!(controller.collection()[0].symbol, "NEW");
}

#[test]
fn stale_failure_is_ignored_too() {
    let mut controller = PageController::<Holding>::new("Portfolio", 50);
    let first = controller.begin_refresh();
    let second = controller.begin_refresh();
    controller.complete_refresh(second, Ok(vec![holding("BTC")]));

    let outcome = controller.complete_refresh(first, Err(AppError::DataUnavailable("late".to_string())));
    assert_eq!(outcome, RefreshOutcome::Stale);
}

#[test]
fn overlapping_async_refreshes_resolve_to_the_latest_request() {
    let (early_tx, early_rx) = oneshot::channel();
    let (late_tx, late_rx) = oneshot::channel();
    let controller = Rc::new(RefCell::new(PageController::<Holding>::new("Portfolio", 50)));
    let source = Rc::new(RefCell::new(Deferred(VecDeque::from([early_rx, late_rx]))));

    let (early, late, ()) = block_on(async {
        futures::join!(
            refresh_shared(&controller, &source),
            refresh_shared(&controller, &source),
            async {
                // Answer the newer request first, then the older one.
                let _ = late_tx.send(Ok(vec![holding("FRESH")]));
                let _ = early_tx.send(Ok(vec![holding("STALE"), holding("STALE2")]));
            }
        )
    });

    assert_eq!(early, RefreshOutcome::Stale);
    assert_eq!(late, RefreshOutcome::Applied { records: 1 });
    assert_eq!(controller.borrow().collection()[0].symbol, "FRESH");
}

#[test]
fn sync_sources_work_through_the_async_path() {
    let controller = Rc::new(RefCell::new(PageController::<Holding>::new("Portfolio", 50)));
    let source = Rc::new(RefCell::new(MockPortfolioSource::new(Box::new(|| 0.5))));

    let outcome = block_on(refresh_shared(&controller, &source));
    assert_eq!(outcome, RefreshOutcome::Applied { records: 8 });
}

#[test]
fn market_feed_is_annotated_from_the_watchlist() {
    let store = Rc::new(RefCell::new(MemoryWatchlistStore::new()));
    toggle_in_store(&mut *store.borrow_mut(), &"solana".into()).unwrap();

    let feed_store = store.clone();
    let mut feed = MockMarketSource::new(Box::new(|| 0.5)).map_records(move |mut assets: Vec<MarketAsset>| {
        let watchlist = feed_store.borrow().load().unwrap_or_default();
        annotate_watchlist(&mut assets, &watchlist);
        assets
    });

    let mut controller = PageController::<MarketAsset>::new("Markets", 50);
    controller.refresh(&mut feed);

    let starred: Vec<&str> = controller
        .collection()
        .iter()
        .filter(|asset| asset.is_watchlisted)
        .map(|asset| asset.id.value())
        .collect();
    assert_eq!(starred, vec!["solana"]);
}

#[test]
fn failing_market_feed_keeps_rows() {
    let mut controller = PageController::<MarketAsset>::new("Markets", 50);
    controller.refresh(&mut MockMarketSource::new(Box::new(|| 0.5)));

    let mut flaky = MockMarketSource::new(Box::new(|| 0.0)).with_failure_rate(1.0);
    let outcome = controller.refresh(&mut flaky);

    assert!(matches!(outcome, RefreshOutcome::Failed(AppError::DataUnavailable(_))));
    assert_eq!(controller.collection().len(), 25);
}
