use std::env;

use tracing::info;

/// Default CFA pager feed polled by the alerter.
pub const DEFAULT_FEED_URL: &str = "https://mazzanet.net.au/cfa/pager-cfa.php";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token. Empty when running in dry-run mode.
    pub discord_token: String,
    pub database_url: String,
    pub feed_url: String,
    pub poll_interval_secs: u64,
    /// When set, deliveries go to a no-op sink instead of Discord.
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        let dry_run = env::var("PAGERWATCH_DRY_RUN").map(|v| v == "1").unwrap_or(false);
        Self {
            discord_token: if dry_run {
                env::var("DISCORD_TOKEN").unwrap_or_default()
            } else {
                required_env("DISCORD_TOKEN")
            },
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/pagerwatch.db?mode=rwc".to_string()),
            feed_url: env::var("PAGER_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            poll_interval_secs: {
                let secs: u64 = env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("POLL_INTERVAL_SECS must be a number");
                // tokio::time::interval panics on a zero period
                assert!(secs > 0, "POLL_INTERVAL_SECS must be non-zero");
                secs
            },
            dry_run,
        }
    }

    /// Log the non-secret parts of the configuration.
    pub fn log_redacted(&self) {
        info!(
            database_url = self.database_url.as_str(),
            feed_url = self.feed_url.as_str(),
            poll_interval_secs = self.poll_interval_secs,
            dry_run = self.dry_run,
            discord_token_set = !self.discord_token.is_empty(),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
