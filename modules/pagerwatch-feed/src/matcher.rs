use std::collections::HashSet;

use pagerwatch_common::{GuildId, Subscription};

/// Guilds whose capcode occurs verbatim in the raw message text.
///
/// The check is a case-sensitive substring test against the pre-parse text,
/// not the structured fields. A guild with several matching capcodes is
/// reported once, in the order its first capcode matched.
pub fn matching_guilds(raw_text: &str, subscriptions: &[Subscription]) -> Vec<GuildId> {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();

    for sub in subscriptions {
        if raw_text.contains(&sub.capcode) && seen.insert(sub.guild_id) {
            matched.push(sub.guild_id);
        }
    }

    matched
}
