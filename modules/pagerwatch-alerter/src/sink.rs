use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use pagerwatch_common::ChannelId;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Pluggable delivery sink for formatted alerts.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Send one embed to a channel, optionally prefixed with a mention.
    async fn send(
        &self,
        channel: ChannelId,
        embed: &serde_json::Value,
        mention: Option<&str>,
    ) -> anyhow::Result<()>;
}

/// Discord REST delivery sink (channel messages endpoint, bot token auth).
pub struct DiscordSink {
    token: String,
    http: reqwest::Client,
}

impl DiscordSink {
    pub fn new(token: String) -> Self {
        Self {
            token,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeliverySink for DiscordSink {
    async fn send(
        &self,
        channel: ChannelId,
        embed: &serde_json::Value,
        mention: Option<&str>,
    ) -> anyhow::Result<()> {
        let url = format!("{DISCORD_API_BASE}/channels/{channel}/messages");
        let body = json!({
            "content": mention.unwrap_or(""),
            "embeds": [embed],
        });

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(channel, status = %status, body = %body, "Discord returned non-success");
            anyhow::bail!("Discord returned {status}");
        }

        Ok(())
    }
}

/// No-op delivery sink for dry runs and testing.
pub struct NoopSink;

#[async_trait]
impl DeliverySink for NoopSink {
    async fn send(
        &self,
        _channel: ChannelId,
        _embed: &serde_json::Value,
        _mention: Option<&str>,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}
