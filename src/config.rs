use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

/// Completion tuning, read from the environment.
#[derive(Debug, Clone, confique::Config)]
pub struct Config {
    /// Upper bound on suggestions returned for one completion request.
    #[config(env = "SQLINTEL_MAX_SUGGESTIONS", default = 100)]
    pub max_suggestions: usize,
    /// Prefix column insertions with the table alias when the query aliases
    /// its tables or joins more than one.
    #[config(env = "SQLINTEL_QUALIFY_COLUMNS", default = true)]
    pub qualify_columns: bool,
    /// Offer views next to tables after FROM/JOIN.
    #[config(env = "SQLINTEL_INCLUDE_VIEWS", default = true)]
    pub include_views: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
