//! Story listing command handler.

use super::commands::{OutputFormat, StoriesArgs};
use storycrawler::{CrawlerResult, JsonError, StoryRecord, StorycrawlerConfig, crawl_stories};
use tracing::debug;

/// Load configuration, apply command-line overrides and print the stories.
pub async fn list_stories(args: StoriesArgs) -> CrawlerResult<()> {
    let mut config = match &args.config {
        Some(path) => StorycrawlerConfig::from_file(path)?,
        None => StorycrawlerConfig::load()?,
    };

    if let Some(url) = args.url {
        config.connection = config.connection.with_url(url);
    }
    if let Some(endpoint) = args.endpoint {
        config.browser = config.browser.with_endpoint(endpoint);
    }
    if args.registry_timeout_ms.is_some() {
        config.crawler = config
            .crawler
            .with_registry_wait_timeout_ms(args.registry_timeout_ms);
        config.crawler.validate()?;
    }

    debug!(?config, "Resolved configuration");

    let stories = crawl_stories(&config).await?;

    match args.format {
        OutputFormat::Human => print_human(&stories),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stories)
                .map_err(|e| JsonError::new(format!("Failed to serialize stories: {}", e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_human(stories: &[StoryRecord]) {
    if stories.is_empty() {
        println!("No stories registered.");
        return;
    }

    for story in stories {
        match &story.id {
            Some(id) => println!("{} / {}  ({})", story.kind, story.name, id),
            None => println!("{} / {}", story.kind, story.name),
        }
    }
    println!();
    println!("{} stories", stories.len());
}
