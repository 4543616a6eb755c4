/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),
}
