mod common;

use common::{init_tracing, MockFetcher, MockPublisher};
use news_poster::config::FeedConfig;
use news_poster::{AppConfig, History, PosterError, PostingPipeline, RunOutcome, StateStore};
use tempfile::TempDir;

fn test_config() -> AppConfig {
    AppConfig {
        feeds: vec![
            FeedConfig {
                url: "mock://official".to_string(),
                display_name: Some("Galatasaray.org".to_string()),
            },
            FeedConfig {
                url: "mock://sports".to_string(),
                display_name: Some("NTV Spor".to_string()),
            },
        ],
        ..AppConfig::default()
    }
}

fn store_in(dir: &TempDir) -> StateStore {
    StateStore::new(dir.path().join("posted.json"), 250)
}

#[tokio::test]
async fn test_successful_post_is_recorded() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let config = test_config();
    let fetcher = MockFetcher::new()
        .with_feed("mock://official", &["Kulüpten duyuru"])
        .with_feed("mock://sports", &["Galatasaray 3-0 kazandı"]);
    let publisher = MockPublisher::ok();

    let pipeline = PostingPipeline::new(&config, &fetcher, Some(&publisher));
    let outcome = pipeline.run(&store).await.unwrap();

    match outcome {
        RunOutcome::Posted { title, source, text, .. } => {
            assert_eq!(title, "Galatasaray 3-0 kazandı");
            assert_eq!(source, "NTV Spor");
            assert_eq!(text, "Galatasaray 3-0 kazandı\nKaynak: NTV Spor");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert_eq!(publisher.posted().len(), 1);
    let history = store.load().unwrap();
    assert_eq!(history.titles(), &["Galatasaray 3-0 kazandı"]);

    // The same story is not posted twice
    let second = pipeline.run(&store).await.unwrap();
    assert!(matches!(second, RunOutcome::NoCandidate));
    assert_eq!(publisher.posted().len(), 1);
}

#[tokio::test]
async fn test_failed_post_is_not_recorded() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let config = test_config();
    let fetcher = MockFetcher::new().with_feed("mock://official", &["Galatasaray kampa girdi"]);
    let publisher = MockPublisher::failing(403);

    let pipeline = PostingPipeline::new(&config, &fetcher, Some(&publisher));
    let err = pipeline.run(&store).await.unwrap_err();

    assert!(matches!(err, PosterError::Api { status: 403, .. }));
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_empty());

    // Next run picks the same item again
    let retry_publisher = MockPublisher::ok();
    let pipeline = PostingPipeline::new(&config, &fetcher, Some(&retry_publisher));
    let outcome = pipeline.run(&store).await.unwrap();
    assert!(matches!(outcome, RunOutcome::Posted { .. }));
    assert_eq!(retry_publisher.posted(), vec!["Galatasaray kampa girdi\nKaynak: Galatasaray.org"]);
}

#[tokio::test]
async fn test_no_candidate_leaves_state_alone() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut history = History::default();
    history.push("Galatasaray kazandı");
    store.save(&history).unwrap();

    let config = test_config();
    let fetcher = MockFetcher::new()
        .with_failing_feed("mock://official")
        .with_feed("mock://sports", &["Basketbolda derbi", "Galatasaray kazandı"]);
    let publisher = MockPublisher::ok();

    let pipeline = PostingPipeline::new(&config, &fetcher, Some(&publisher));
    let outcome = pipeline.run(&store).await.unwrap();

    assert!(matches!(outcome, RunOutcome::NoCandidate));
    assert!(publisher.posted().is_empty());
    assert_eq!(store.load().unwrap(), history);
}

#[tokio::test]
async fn test_dry_run_does_not_post_or_save() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let config = test_config();
    let fetcher = MockFetcher::new().with_feed("mock://official", &["Cimbom yeni sezona hazır"]);

    let pipeline = PostingPipeline::new(&config, &fetcher, None);
    let outcome = pipeline.run(&store).await.unwrap();

    match outcome {
        RunOutcome::DryRun { title, text } => {
            assert_eq!(title, "Cimbom yeni sezona hazır");
            assert!(text.ends_with("\nKaynak: Galatasaray.org"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_history_cap_applies_across_runs() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("posted.json"), 3);
    store
        .save(&History::from_titles(
            vec!["bir".into(), "iki".into(), "üç".into()],
            3,
        ))
        .unwrap();

    let config = test_config();
    let fetcher = MockFetcher::new().with_feed("mock://official", &["Galatasaray dört attı"]);
    let publisher = MockPublisher::ok();

    PostingPipeline::new(&config, &fetcher, Some(&publisher))
        .run(&store)
        .await
        .unwrap();

    let history = store.load().unwrap();
    assert_eq!(history.titles(), &["iki", "üç", "Galatasaray dört attı"]);
}
