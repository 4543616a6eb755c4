use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use pagerwatch_feed::{matching_guilds, parse_incident, PagerFeed};
use pagerwatch_store::SubscriptionStore;

use crate::dispatch::{DispatchOutcome, Dispatcher};

/// What one poll cycle did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub candidates: usize,
    pub incidents: usize,
    pub dispatched: usize,
    pub delivery_failures: usize,
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "candidates={} incidents={} dispatched={} delivery_failures={}",
            self.candidates, self.incidents, self.dispatched, self.delivery_failures
        )
    }
}

/// Runs the fetch → parse → match → dispatch pipeline on a fixed cadence.
pub struct Poller {
    feed: Arc<dyn PagerFeed>,
    store: SubscriptionStore,
    dispatcher: Dispatcher,
    interval: Duration,
}

impl Poller {
    pub fn new(
        feed: Arc<dyn PagerFeed>,
        store: SubscriptionStore,
        dispatcher: Dispatcher,
        interval: Duration,
    ) -> Self {
        Self {
            feed,
            store,
            dispatcher,
            interval,
        }
    }

    /// Poll forever. Nothing inside a cycle is fatal; the loop only ends with
    /// the process.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let stats = self.run_cycle().await;
            if stats.dispatched > 0 || stats.delivery_failures > 0 {
                info!(%stats, "Poll cycle complete");
            } else {
                debug!(%stats, "Poll cycle complete");
            }
        }
    }

    /// One full pipeline pass. Never fails: fetch errors become an empty
    /// cycle, a failed subscription read skips the cycle, and delivery
    /// errors are counted per guild.
    pub async fn run_cycle(&self) -> CycleStats {
        let mut stats = CycleStats::default();

        let candidates = match self.feed.fetch_candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Feed fetch failed, treating cycle as empty");
                Vec::new()
            }
        };
        stats.candidates = candidates.len();
        if candidates.is_empty() {
            return stats;
        }

        // One subscription snapshot per cycle. Registrations committed after
        // this read are picked up next cycle.
        let subscriptions = match self.store.list_capcodes().await {
            Ok(subs) => subs,
            Err(e) => {
                warn!(error = %e, "Subscription snapshot failed, skipping cycle");
                return stats;
            }
        };

        let mut work = Vec::new();
        for text in &candidates {
            let Some(incident) = parse_incident(text) else {
                continue;
            };
            stats.incidents += 1;
            for guild_id in matching_guilds(text, &subscriptions) {
                work.push((guild_id, incident.clone()));
            }
        }

        // Fan out: one future per matched guild, joined before the loop
        // sleeps. A slow or failing destination cannot hold up the others.
        let outcomes = join_all(work.into_iter().map(|(guild_id, incident)| {
            let dispatcher = self.dispatcher.clone();
            async move {
                match dispatcher.dispatch(guild_id, &incident).await {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        warn!(guild_id, error = %e, "Alert delivery failed");
                        None
                    }
                }
            }
        }))
        .await;

        for outcome in outcomes {
            match outcome {
                Some(DispatchOutcome::Sent) => stats.dispatched += 1,
                Some(DispatchOutcome::Skipped) => {}
                None => stats.delivery_failures += 1,
            }
        }

        stats
    }
}
