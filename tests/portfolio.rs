use cryptohub_dashboard::application::{DataSource, PortfolioBook};
use cryptohub_dashboard::domain::errors::AppError;
use cryptohub_dashboard::domain::portfolio::{
    Holding, PortfolioStats, Transaction, TransactionKind, allocation, to_csv,
};
use cryptohub_dashboard::infrastructure::{MockPortfolioSource, MockQuoteProvider};

fn book() -> PortfolioBook<MockPortfolioSource, MockQuoteProvider> {
    PortfolioBook::new(
        MockPortfolioSource::new(Box::new(|| 0.5)),
        MockQuoteProvider::new(Box::new(|| 0.5)),
    )
}

fn find<'a>(holdings: &'a [Holding], symbol: &str) -> &'a Holding {
    holdings.iter().find(|h| h.symbol == symbol).unwrap()
}

#[test]
fn buying_a_new_coin_opens_a_priced_holding() {
    let mut book = book();
    book.fetch().unwrap();

    let buy = Transaction::new(TransactionKind::Buy, "uni", 10.0, 90.0).unwrap();
    book.record(&buy).unwrap();

    let holdings = book.fetch().unwrap();
    assert_eq!(holdings.len(), 9);
    let uni = find(&holdings, "UNI");
    assert_eq!(uni.amount, 10.0);
    assert_eq!(uni.avg_buy_price, 90.0);
    assert_eq!(uni.current_price, 100.0);
}

#[test]
fn buying_more_reweights_the_average_price() {
    let mut book = book();
    book.record(&Transaction::new(TransactionKind::Buy, "BTC", 0.5, 50_000.0).unwrap()).unwrap();

    let btc = find(book.holdings(), "BTC");
    assert_eq!(btc.amount, 1.0);
    assert_eq!(btc.avg_buy_price, 45_000.0);
}

#[test]
fn selling_everything_drops_the_holding() {
    let mut book = book();
    book.record(&Transaction::new(TransactionKind::Sell, "SOL", 30.0, 100.0).unwrap()).unwrap();

    assert_eq!(book.holdings().len(), 7);
    assert!(book.holdings().iter().all(|h| h.symbol != "SOL"));
}

#[test]
fn selling_an_unknown_coin_is_rejected() {
    let mut book = book();
    let sell = Transaction::new(TransactionKind::Sell, "XRP", 1.0, 1.0).unwrap();
    assert!(matches!(book.record(&sell), Err(AppError::Validation(_))));
    assert_eq!(book.holdings().len(), 8);
}

#[test]
fn invalid_transactions_are_validation_errors() {
    for (symbol, amount, price) in [("", 1.0, 1.0), ("BTC", 0.0, 1.0), ("BTC", 1.0, -5.0), ("BTC", f64::NAN, 1.0)] {
        let result = Transaction::new(TransactionKind::Buy, symbol, amount, price);
        assert!(matches!(result, Err(AppError::Validation(_))), "{:?}", (symbol, amount, price));
    }
}

#[test]
fn transactions_survive_refreshes() {
    let mut book = book();
    book.fetch().unwrap();
    assert!(book.remove("DOT"));
    assert!(!book.remove("DOT"));

    let refreshed = book.fetch().unwrap();
    assert_eq!(refreshed.len(), 7);
}

#[test]
fn stats_and_allocation() {
    let holdings = vec![
        Holding {
            symbol: "SOL".to_string(),
            name: "Solana".to_string(),
            amount: 2.0,
            avg_buy_price: 10.0,
            current_price: 15.0,
            change_24h: 0.0,
        },
        Holding {
            symbol: "ADA".to_string(),
            name: "Cardano".to_string(),
            amount: 10.0,
            avg_buy_price: 2.0,
            current_price: 1.0,
            change_24h: 0.0,
        },
    ];

    let stats = PortfolioStats::from_holdings(&holdings);
    assert_eq!(stats.total_value, 40.0);
    assert_eq!(stats.total_cost, 40.0);
    assert_eq!(stats.total_pnl, 0.0);
    assert_eq!(stats.coin_count, 2);
    assert_eq!(stats.best_performer.as_deref(), Some("SOL"));

    let shares: Vec<f64> = allocation(&holdings).iter().map(|slice| slice.percent).collect();
    assert_eq!(shares, vec![75.0, 25.0]);

    insta::assert_snapshot!(to_csv(&holdings), @r###"
    Symbol,Name,Amount,Avg Buy Price,Current Price,Market Value,P&L,P&L %
    SOL,Solana,2,10,15,30,10,50
    ADA,Cardano,10,2,1,10,-10,-50
    "###);
}

#[test]
fn holding_json_carries_derived_figures() {
    let losing = Holding {
        symbol: "ADA".to_string(),
        name: "Cardano".to_string(),
        amount: 10.0,
        avg_buy_price: 2.0,
        current_price: 1.0,
        change_24h: -0.5,
    };

    let json = serde_json::to_value(&losing).unwrap();
    assert_eq!(json["marketValue"], 10.0);
    assert_eq!(json["totalCost"], 20.0);
    assert_eq!(json["pnl"], -10.0);
    assert_eq!(json["pnlPercent"], -50.0);

    let parsed: Holding = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, losing);
}

#[test]
fn empty_book_has_neutral_stats() {
    let stats = PortfolioStats::from_holdings(&[]);
    assert_eq!(stats.total_pnl_percent, 0.0);
    assert_eq!(stats.best_performer, None);
    assert_eq!(to_csv(&[]).lines().count(), 1);
}
