use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrollError {
    /// A component asked for the scroll capability outside of `<SmoothScroll>`.
    #[error("use_smooth_scroll must be used within <SmoothScroll>")]
    MissingProvider,
    #[error("invalid scroll config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse scroll config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("no browser window or document available")]
    NoWindow,
}
