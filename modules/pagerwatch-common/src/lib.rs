pub mod config;
pub mod types;

pub use config::Config;
pub use types::{ChannelId, GuildId, Incident, MentionId, NotificationSettings, Subscription};
