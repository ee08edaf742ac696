/// Failures at the edges of the engine.
///
/// Analysis itself never fails: malformed SQL degrades to partial results and
/// unknown objects become validation markers. Only loading configuration and
/// decoding a schema snapshot can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid schema snapshot: {0}")]
    Schema(#[from] serde_json::Error),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
