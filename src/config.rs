use crate::domain::error::DomainError;
use crate::domain::values::metric::Metric;
use crate::domain::values::top_k::TopK;
use std::path::PathBuf;

pub const ENV_CORPUS: &str = "EMBEDSERVE_CORPUS";
pub const ENV_BIND: &str = "EMBEDSERVE_BIND";
pub const ENV_TOPK: &str = "EMBEDSERVE_TOPK";
pub const ENV_MODE: &str = "EMBEDSERVE_MODE";
pub const ENV_LOG: &str = "EMBEDSERVE_LOG";

pub const DEFAULT_CORPUS: &str = "./embeddings";
pub const DEFAULT_BIND: &str = "0.0.0.0:1234";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub corpus_dir: PathBuf,
    pub bind: String,
    pub default_top_k: TopK,
    pub default_metric: Metric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS),
            bind: DEFAULT_BIND.to_string(),
            default_top_k: TopK::default(),
            default_metric: Metric::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_CORPUS) {
            config.corpus_dir = PathBuf::from(dir);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            config.bind = bind;
        }
        if let Some(raw) = lookup(ENV_TOPK) {
            let k: i64 = raw
                .trim()
                .parse()
                .map_err(|e| DomainError::Config(format!("{ENV_TOPK}={raw}: {e}")))?;
            config.default_top_k =
                TopK::new(k).map_err(|e| DomainError::Config(format!("{ENV_TOPK}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_MODE) {
            config.default_metric = raw
                .parse()
                .map_err(|e: String| DomainError::Config(format!("{ENV_MODE}: {e}")))?;
        }

        Ok(config)
    }
}
