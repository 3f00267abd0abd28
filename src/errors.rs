use thiserror::Error;

/// Errors surfaced at the library boundary. The projection core itself never
/// raises: malformed entries contribute zero occurrences and unknown scenario
/// targets are no-ops, so only name resolution and window construction fail.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown quick-select preset: {0}")]
    UnknownQuickSelect(String),
    #[error("invalid period range: {0}")]
    InvalidRange(String),
}
