use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagerwatch_alerter::{DeliverySink, Dispatcher, DiscordSink, NoopSink, Poller};
use pagerwatch_common::Config;
use pagerwatch_feed::HttpPagerFeed;
use pagerwatch_store::SubscriptionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pagerwatch=info".parse()?))
        .init();

    info!("PagerWatch alerter starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    // Open the store. The parent directory must exist before SQLite can
    // create the database file.
    if let Some(path) = config.database_url.strip_prefix("sqlite:") {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    let pool = SqlitePool::connect(&config.database_url).await?;
    let store = SubscriptionStore::new(pool);

    // Run migrations (idempotent)
    store.migrate().await?;

    // Build the delivery sink: Discord unless this is a dry run
    let sink: Arc<dyn DeliverySink> = if config.dry_run {
        info!("Dry run: deliveries disabled");
        Arc::new(NoopSink)
    } else {
        Arc::new(DiscordSink::new(config.discord_token.clone()))
    };

    let feed = Arc::new(HttpPagerFeed::new(config.feed_url.clone()));
    let dispatcher = Dispatcher::new(store.clone(), sink);
    let poller = Poller::new(
        feed,
        store,
        dispatcher,
        Duration::from_secs(config.poll_interval_secs),
    );

    info!(
        interval_secs = config.poll_interval_secs,
        "Entering poll loop"
    );
    poller.run().await;

    Ok(())
}
