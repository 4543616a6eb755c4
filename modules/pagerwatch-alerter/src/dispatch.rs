use std::sync::Arc;

use serde_json::json;

use pagerwatch_common::{GuildId, Incident};
use pagerwatch_store::SubscriptionStore;

use crate::sink::DeliverySink;

/// Whether a dispatch actually sent anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// The guild has no settings row or no alert channel. Not an error: an
    /// unconfigured guild simply receives nothing.
    Skipped,
}

/// Resolves a guild's notification settings and hands the incident to the
/// delivery sink.
#[derive(Clone)]
pub struct Dispatcher {
    store: SubscriptionStore,
    sink: Arc<dyn DeliverySink>,
}

impl Dispatcher {
    pub fn new(store: SubscriptionStore, sink: Arc<dyn DeliverySink>) -> Self {
        Self { store, sink }
    }

    pub async fn dispatch(
        &self,
        guild_id: GuildId,
        incident: &Incident,
    ) -> anyhow::Result<DispatchOutcome> {
        let Some(settings) = self.store.get_settings(guild_id).await? else {
            return Ok(DispatchOutcome::Skipped);
        };
        let Some(channel) = settings.alert_channel else {
            return Ok(DispatchOutcome::Skipped);
        };

        let mention = settings.mention_target.map(|id| format!("<@&{id}>"));
        let embed = alert_embed(incident);

        self.sink.send(channel, &embed, mention.as_deref()).await?;
        Ok(DispatchOutcome::Sent)
    }
}

/// Discord embed payload for one incident.
pub fn alert_embed(incident: &Incident) -> serde_json::Value {
    json!({
        "title": "🚨 Emergency Alert 🚨",
        "color": 0xff0000,
        "fields": [
            { "name": "Incident Type", "value": incident.incident_type, "inline": false },
            { "name": "Description", "value": incident.description, "inline": false },
            { "name": "Address", "value": incident.address, "inline": false },
            { "name": "Services Paged", "value": incident.services_paged, "inline": false },
            { "name": "Appliances/Brigades", "value": incident.appliances_paged, "inline": false },
            { "name": "FIRS Number", "value": incident.firs_number.to_string(), "inline": false },
        ],
    })
}
