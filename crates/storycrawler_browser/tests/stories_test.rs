//! Tests for the story enumeration protocol against a scripted page.

mod test_utils;

use std::time::Duration;
use storycrawler_browser::{StoriesBrowser, StorybookConnection};
use storycrawler_config::CrawlerSettings;
use storycrawler_core::{LegacyKindGroup, StoryRecord, StoryVersion};
use storycrawler_error::{CrawlerErrorKind, NavigationErrorKind, RegistryErrorKind};
use storycrawler_interface::WaitUntil;
use test_utils::{MockPage, MockRegistry, raw};

const BASE: &str = "http://localhost:6006";
const PROBE: &str =
    "http://localhost:6006/iframe.html?selectedKind=story-crawler-kind&selectedStory=story-crawler-story";

fn enumerator(page: MockPage, settings: CrawlerSettings) -> anyhow::Result<StoriesBrowser<MockPage>> {
    let connection = StorybookConnection::new("http://localhost:6006/")?;
    Ok(StoriesBrowser::new(connection, page, settings))
}

#[tokio::test]
async fn test_navigates_base_then_probe() -> anyhow::Result<()> {
    let settings = CrawlerSettings::builder()
        .navigation_timeout_ms(5_000)
        .build()?;
    let mut browser = enumerator(MockPage::new(MockRegistry::Raw(vec![])), settings)?;

    browser.get_stories().await?;

    let navigations = browser.page().navigations();
    assert_eq!(navigations.len(), 2);

    let (url, options) = &navigations[0];
    assert_eq!(url, BASE);
    assert_eq!(*options.wait_until(), WaitUntil::Load);

    let (url, options) = &navigations[1];
    assert_eq!(url, PROBE);
    assert_eq!(*options.wait_until(), WaitUntil::DomContentLoaded);
    assert_eq!(*options.timeout(), Duration::from_secs(5));

    assert_eq!(
        browser.page().predicates(),
        vec!["window.__STORYBOOK_CLIENT_API__".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_legacy_groups_are_flattened() -> anyhow::Result<()> {
    let page = MockPage::new(MockRegistry::Legacy(vec![
        LegacyKindGroup::new("Button", ["Primary", "Secondary"]),
        LegacyKindGroup::new("Input", ["Text"]),
    ]));
    let mut browser = enumerator(page, CrawlerSettings::default())?;

    let stories = browser.get_stories().await?;

    assert_eq!(
        stories,
        vec![
            StoryRecord::v4("Button", "Primary"),
            StoryRecord::v4("Button", "Secondary"),
            StoryRecord::v4("Input", "Text"),
        ]
    );
    assert!(stories.iter().all(|s| s.id.is_none()));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_configuring_registry_returns_final_list() -> anyhow::Result<()> {
    let page = MockPage::new(MockRegistry::Configuring {
        polls: Some(2),
        before: vec![],
        after: vec![raw("a--b", "A", "b")],
    });
    let mut browser = enumerator(page, CrawlerSettings::default())?;

    let stories = browser.get_stories().await?;

    assert_eq!(stories, vec![StoryRecord::v5("a--b", "A", "b")]);
    assert_eq!(stories[0].version, StoryVersion::V5);
    assert_eq!(browser.page().snapshot_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_empty_canonical_list_is_not_an_error() -> anyhow::Result<()> {
    let mut browser = enumerator(MockPage::new(MockRegistry::Raw(vec![])), CrawlerSettings::default())?;

    let stories = browser.get_stories().await?;

    assert!(stories.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_legacy_registry_is_not_an_error() -> anyhow::Result<()> {
    let mut browser = enumerator(
        MockPage::new(MockRegistry::Legacy(vec![])),
        CrawlerSettings::default(),
    )?;

    let stories = browser.get_stories().await?;

    assert!(stories.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_registry_without_methods_is_no_stories() -> anyhow::Result<()> {
    let mut browser = enumerator(MockPage::new(MockRegistry::Empty), CrawlerSettings::default())?;

    let err = browser
        .get_stories()
        .await
        .expect_err("Registry without methods should fail");

    assert!(err.is_no_stories());
    Ok(())
}

#[tokio::test]
async fn test_probe_navigation_timeout_propagates() -> anyhow::Result<()> {
    let page = MockPage::new(MockRegistry::Raw(vec![])).failing_navigation(
        "iframe.html",
        NavigationErrorKind::Timeout {
            url: PROBE.to_string(),
            timeout_ms: 60_000,
        },
    );
    let mut browser = enumerator(page, CrawlerSettings::default())?;

    let err = browser
        .get_stories()
        .await
        .expect_err("Navigation timeout should propagate");

    match err.kind() {
        CrawlerErrorKind::Navigation(e) => assert!(e.is_timeout()),
        other => panic!("Expected navigation error, got {}", other),
    }
    assert_eq!(browser.page().snapshot_count(), 0);
    assert!(browser.page().predicates().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_bounded_registry_wait_reports_never_appeared() -> anyhow::Result<()> {
    let settings = CrawlerSettings::builder()
        .registry_wait_timeout_ms(Some(5_000))
        .build()?;
    let mut browser = enumerator(MockPage::new(MockRegistry::Empty).never_defined(), settings)?;

    let err = browser
        .get_stories()
        .await
        .expect_err("Registry never appears");

    match err.kind() {
        CrawlerErrorKind::Registry(e) => {
            assert_eq!(e.kind, RegistryErrorKind::NeverAppeared { timeout_ms: 5_000 })
        }
        other => panic!("Expected registry error, got {}", other),
    }
    assert_eq!(browser.page().snapshot_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_registry_wait_never_fails() -> anyhow::Result<()> {
    let mut browser = enumerator(
        MockPage::new(MockRegistry::Empty).never_defined(),
        CrawlerSettings::default(),
    )?;

    let outcome = tokio::time::timeout(Duration::from_secs(3_600), browser.get_stories()).await;

    assert!(outcome.is_err(), "Enumeration should still be waiting");
    Ok(())
}
