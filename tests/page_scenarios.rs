use cryptohub_dashboard::application::{DataSource, PageController};
use cryptohub_dashboard::domain::listing::{PageRange, SortSpec};
use cryptohub_dashboard::domain::market::{
    AssetCategory, AssetId, MarketAsset, MarketFilter, MarketSortField,
};
use cryptohub_dashboard::domain::portfolio::{Holding, HoldingSortField};
use cryptohub_dashboard::infrastructure::{MockMarketSource, MockPortfolioSource};

fn asset(rank: u32, change_24h: f64) -> MarketAsset {
    MarketAsset {
        id: AssetId::from(format!("asset-{}", rank)),
        rank,
        name: format!("Asset {}", rank),
        symbol: format!("A{}", rank),
        category: AssetCategory::Layer1,
        price: 1.0,
        change_1h: 0.0,
        change_24h,
        change_7d: 0.0,
        market_cap: 1e9,
        volume_24h: 1e6,
        circulating_supply: 1e6,
        total_supply: 1e6,
        max_supply: None,
        sparkline: vec![100.0, 101.0],
        is_watchlisted: false,
    }
}

fn markets(count: u32) -> PageController<MarketAsset> {
    let mut controller = PageController::<MarketAsset>::new("Markets", 50);
    controller.replace_collection((1..=count).map(|rank| asset(rank, 0.0)).collect());
    controller
}

#[test]
fn gainers_sorted_by_daily_change_descending() {
    // 12 gainers, 12 losers and one flat asset.
    let assets: Vec<MarketAsset> = (1..=25)
        .map(|rank| {
            let change = match rank {
                1..=12 => f64::from(rank) * 0.5,
                13 => 0.0,
                _ => -f64::from(rank),
            };
            asset(rank, change)
        })
        .collect();

    let mut controller = PageController::<MarketAsset>::new("Markets", 50);
    controller.replace_collection(assets);
    controller.set_filter(MarketFilter::from_key("gainers"));
    controller.set_sort(SortSpec::parse("change_24h_desc"));

    let view = controller.view();
    assert_eq!(view.rows.len(), 12);
    assert_eq!(view.total_pages, 1);
    assert!(view.rows.iter().all(|row| row.change_24h > 0.0));
    assert!(view.rows.windows(2).all(|pair| pair[0].change_24h >= pair[1].change_24h));
    assert_eq!(view.rows[0].rank, 12);

    controller.set_filter(MarketFilter::from_key("losers"));
    let losers = controller.view();
    assert_eq!(losers.rows.len(), 12);
    assert!(losers.rows.iter().all(|row| row.change_24h < 0.0));
    assert!(losers.rows.iter().all(|row| row.rank != 13));
}

#[test]
fn eight_holdings_fit_one_page() {
    let mut controller = PageController::<Holding>::new("Portfolio", 50);
    let outcome = controller.refresh(&mut MockPortfolioSource::new(Box::new(|| 0.5)));
    assert!(matches!(
        outcome,
        cryptohub_dashboard::application::RefreshOutcome::Applied { records: 8 }
    ));

    let view = controller.view();
    assert_eq!(view.rows.len(), 8);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.page_window, vec![1]);
    assert_eq!(view.range.to_string(), "Showing 1-8 of 8 results");
}

#[test]
fn search_matches_name_or_symbol_case_insensitively() {
    let assets = MockMarketSource::new(Box::new(|| 0.5)).fetch().unwrap();
    let mut controller = PageController::<MarketAsset>::new("Markets", 50);
    controller.replace_collection(assets);

    controller.set_query("  BIT ");
    let view = controller.view();
    let ids: Vec<&str> = view.rows.iter().map(|row| row.id.value()).collect();
    assert_eq!(ids, vec!["bitcoin"]);

    controller.set_query("sol");
    let view = controller.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].symbol, "SOL");
}

#[test]
fn shrinking_collection_resets_out_of_range_page() {
    let mut controller = markets(120);
    assert_eq!(controller.go_to_page(3), 3);
    assert_eq!(controller.view().rows.len(), 20);

    controller.replace_collection((1..=30).map(|rank| asset(rank, 0.0)).collect());
    let view = controller.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.rows.len(), 30);
}

#[test]
fn filter_and_query_reset_to_first_page_but_sort_does_not() {
    let mut controller = markets(120);
    controller.go_to_page(2);

    controller.set_sort(Some(SortSpec::desc(MarketSortField::Rank)));
    assert_eq!(controller.current_page(), 2);
    assert_eq!(controller.view().rows[0].rank, 70);

    controller.set_query("asset");
    assert_eq!(controller.current_page(), 1);

    controller.go_to_page(3);
    controller.set_filter(MarketFilter::All);
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn navigation_is_clamped() {
    let mut controller = markets(120);
    assert_eq!(controller.go_to_page(0), 1);
    assert_eq!(controller.go_to_page(99), 3);
    assert_eq!(controller.next_page(), 3);
    assert_eq!(controller.previous_page(), 2);
    assert_eq!(controller.previous_page(), 1);
    assert_eq!(controller.previous_page(), 1);
}

#[test]
fn empty_result_has_one_page_and_empty_range() {
    let mut controller = markets(10);
    controller.set_filter(MarketFilter::Gainers);
    let view = controller.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.total_matches, 0);
    assert_eq!(view.total_items, 10);
    assert_eq!(view.range, PageRange { first: 0, last: 0, total: 0 });
}

#[test]
fn unknown_sort_key_keeps_collection_order() {
    let mut controller = markets(5);
    controller.set_sort(SortSpec::<MarketSortField>::parse("no_such_column"));
    let ranks: Vec<u32> = controller.view().rows.iter().map(|row| row.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

#[test]
fn page_window_follows_current_page() {
    let mut controller = PageController::<MarketAsset>::new("Markets", 10);
    controller.replace_collection((1..=100).map(|rank| asset(rank, 0.0)).collect());
    controller.go_to_page(6);
    assert_eq!(controller.view().page_window, vec![4, 5, 6, 7, 8]);
    controller.go_to_page(10);
    assert_eq!(controller.view().page_window, vec![6, 7, 8, 9, 10]);
}

#[test]
fn page_view_serializes_in_camel_case() {
    let mut controller = PageController::<Holding>::new("Portfolio", 50)
        .with_default_sort(SortSpec::desc(HoldingSortField::MarketValue));
    controller.replace_collection(vec![Holding {
        symbol: "SOL".to_string(),
        name: "Solana".to_string(),
        amount: 2.0,
        avg_buy_price: 10.0,
        current_price: 15.0,
        change_24h: 1.5,
    }]);

    let json = serde_json::to_value(controller.view()).unwrap();
    insta::assert_json_snapshot!(json, @r###"
    {
      "currentPage": 1,
      "pageWindow": [
        1
      ],
      "range": {
        "first": 1,
        "last": 1,
        "total": 1
      },
      "rows": [
        {
          "amount": 2.0,
          "avgBuyPrice": 10.0,
          "change24h": 1.5,
          "currentPrice": 15.0,
          "marketValue": 30.0,
          "name": "Solana",
          "pnl": 10.0,
          "pnlPercent": 50.0,
          "symbol": "SOL",
          "totalCost": 20.0
        }
      ],
      "totalItems": 1,
      "totalMatches": 1,
      "totalPages": 1
    }
    "###);
}
