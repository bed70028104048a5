use cryptohub_dashboard::application::{DataSource, NewsBook, PageController, RefreshOutcome};
use cryptohub_dashboard::domain::errors::AppError;
use cryptohub_dashboard::domain::news::Article;
use cryptohub_dashboard::infrastructure::MockNewsSource;

const NOW: u64 = 1_700_000_000_000;

fn book() -> NewsBook<MockNewsSource> {
    NewsBook::new(MockNewsSource::new(Box::new(|| NOW)), Box::new(|| NOW))
}

fn likes(controller: &PageController<Article>, id: u32) -> (u32, bool) {
    let article = controller.find(&id).unwrap();
    (article.likes, article.is_liked)
}

#[test]
fn likes_survive_the_periodic_refresh() {
    let mut book = book();
    let mut controller = PageController::<Article>::new("News", 50);
    assert_eq!(controller.refresh(&mut book), RefreshOutcome::Applied { records: 8 });
    let (seeded, liked) = likes(&controller, 1);
    assert!(!liked);

    assert!(book.toggle_like(1).unwrap());
    controller.refresh(&mut book);
    assert_eq!(likes(&controller, 1), (seeded + 1, true));

    controller.refresh(&mut book);
    assert_eq!(likes(&controller, 1), (seeded + 1, true));
}

#[test]
fn unliking_a_seeded_like_also_sticks() {
    let mut book = book();
    let mut controller = PageController::<Article>::new("News", 50);
    controller.refresh(&mut book);
    let (seeded, liked) = likes(&controller, 8);
    assert!(liked);

    assert!(!book.toggle_like(8).unwrap());
    controller.refresh(&mut book);
    assert_eq!(likes(&controller, 8), (seeded - 1, false));
}

#[test]
fn liking_updates_the_trending_score() {
    let mut book = book();
    let before = book.fetch().unwrap()[0].trending_score;
    book.toggle_like(1).unwrap();
    assert!(book.articles()[0].trending_score > before);
}

#[test]
fn unknown_article_is_rejected() {
    let mut book = book();
    book.fetch().unwrap();
    assert!(matches!(book.toggle_like(99), Err(AppError::Validation(_))));
}
