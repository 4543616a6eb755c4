pub mod error;
pub mod fetch;
pub mod matcher;
pub mod parse;

pub use error::{FeedError, Result};
pub use fetch::{HttpPagerFeed, PagerFeed};
pub use matcher::matching_guilds;
pub use parse::parse_incident;
