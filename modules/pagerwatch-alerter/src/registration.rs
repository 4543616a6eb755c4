use pagerwatch_common::{ChannelId, GuildId, MentionId};
use pagerwatch_store::{Result, SubscriptionStore};

/// Thin write surface the chat-platform command handlers call. Each
/// operation maps onto one store write and returns the confirmation text
/// shown to the caller; store failures surface as the command's failure
/// response.
#[derive(Clone)]
pub struct Registration {
    store: SubscriptionStore,
}

impl Registration {
    pub fn new(store: SubscriptionStore) -> Self {
        Self { store }
    }

    pub async fn add_capcode(&self, guild_id: GuildId, capcode: &str) -> Result<String> {
        let inserted = self.store.add_capcode(guild_id, capcode).await?;
        Ok(if inserted {
            format!("✅ Capcode `{capcode}` added for this server!")
        } else {
            format!("Capcode `{capcode}` is already registered for this server.")
        })
    }

    pub async fn remove_capcode(&self, guild_id: GuildId, capcode: &str) -> Result<String> {
        let removed = self.store.remove_capcode(guild_id, capcode).await?;
        Ok(if removed {
            format!("✅ Capcode `{capcode}` removed for this server.")
        } else {
            format!("Capcode `{capcode}` is not registered for this server.")
        })
    }

    pub async fn set_alert_channel(&self, guild_id: GuildId, channel: ChannelId) -> Result<String> {
        self.store.set_alert_channel(guild_id, channel).await?;
        Ok(format!("✅ Alerts will be sent to <#{channel}>"))
    }

    pub async fn set_mention_target(&self, guild_id: GuildId, target: MentionId) -> Result<String> {
        self.store.set_mention_target(guild_id, target).await?;
        Ok(format!("✅ Alerts will mention <@&{target}>"))
    }
}
