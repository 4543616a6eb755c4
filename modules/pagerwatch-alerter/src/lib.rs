pub mod dispatch;
pub mod poller;
pub mod registration;
pub mod sink;

pub use dispatch::{DispatchOutcome, Dispatcher};
pub use poller::{CycleStats, Poller};
pub use registration::Registration;
pub use sink::{DeliverySink, DiscordSink, NoopSink};
