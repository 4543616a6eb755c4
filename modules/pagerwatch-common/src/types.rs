use serde::Serialize;

/// Discord guild snowflake. One guild is one independent alerting scope.
pub type GuildId = i64;
/// Discord channel snowflake.
pub type ChannelId = i64;
/// Discord role or user snowflake used as a mention target.
pub type MentionId = i64;

/// One structured CFA pager incident, parsed from a single raw message.
/// Ephemeral: lives only for the poll cycle that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub response_table_ref: String,
    pub incident_type: String,
    pub description: String,
    pub address: String,
    /// Map grid reference, always exactly 6 ASCII digits.
    pub grid_reference: String,
    pub services_paged: String,
    pub appliances_paged: String,
    pub firs_number: i64,
}

/// One registered (guild, capcode) watch pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub guild_id: GuildId,
    pub capcode: String,
}

/// Per-guild notification routing. Either field may be unset because the two
/// are written by independent registration calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    pub alert_channel: Option<ChannelId>,
    pub mention_target: Option<MentionId>,
}
