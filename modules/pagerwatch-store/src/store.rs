use chrono::Utc;
use sqlx::SqlitePool;

use pagerwatch_common::{ChannelId, GuildId, MentionId, NotificationSettings, Subscription};

use crate::error::Result;

/// Durable guild → capcodes / guild → settings mapping over SQLite.
///
/// Every operation is a single statement, so concurrent registration calls
/// and the poll loop's snapshot read serialize through SQLite's writer lock
/// and no update is lost.
#[derive(Clone)]
pub struct SubscriptionStore {
    pool: SqlitePool,
}

impl SubscriptionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run the embedded SQL migrations. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Register a capcode for a guild. Returns false if the pair was already
    /// registered (re-registration is idempotent, not an error).
    pub async fn add_capcode(&self, guild_id: GuildId, capcode: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO capcodes (guild_id, capcode, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (guild_id, capcode) DO NOTHING
            "#,
        )
        .bind(guild_id)
        .bind(capcode)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a registered capcode. Returns false if the pair did not exist.
    pub async fn remove_capcode(&self, guild_id: GuildId, capcode: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM capcodes WHERE guild_id = ?1 AND capcode = ?2")
            .bind(guild_id)
            .bind(capcode)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Full snapshot of all (guild, capcode) pairs in insertion order.
    /// The poll loop reads this once per cycle.
    pub async fn list_capcodes(&self) -> Result<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT guild_id, capcode FROM capcodes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(guild_id, capcode)| Subscription { guild_id, capcode })
            .collect())
    }

    /// Set the guild's alert channel, preserving any mention target already
    /// stored for it.
    pub async fn set_alert_channel(&self, guild_id: GuildId, channel: ChannelId) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (guild_id, alert_channel)
            VALUES (?1, ?2)
            ON CONFLICT (guild_id) DO UPDATE SET alert_channel = excluded.alert_channel
            "#,
        )
        .bind(guild_id)
        .bind(channel)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Set the guild's mention target, preserving any alert channel already
    /// stored for it.
    pub async fn set_mention_target(&self, guild_id: GuildId, target: MentionId) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (guild_id, mention_target)
            VALUES (?1, ?2)
            ON CONFLICT (guild_id) DO UPDATE SET mention_target = excluded.mention_target
            "#,
        )
        .bind(guild_id)
        .bind(target)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Notification settings for a guild, or None if it has no settings row.
    pub async fn get_settings(&self, guild_id: GuildId) -> Result<Option<NotificationSettings>> {
        let row = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
            "SELECT alert_channel, mention_target FROM settings WHERE guild_id = ?1",
        )
        .bind(guild_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(alert_channel, mention_target)| NotificationSettings {
            alert_channel,
            mention_target,
        }))
    }
}
