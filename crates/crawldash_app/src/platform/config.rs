//! Runtime configuration read from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crawldash_engine::ClientSettings;
use crawldash_logging::{parse_level, LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

pub const ENV_STATE_DIR: &str = "CRAWLDASH_STATE_DIR";
pub const ENV_LOG: &str = "CRAWLDASH_LOG";
pub const ENV_LOG_LEVEL: &str = "CRAWLDASH_LOG_LEVEL";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "CRAWLDASH_CONNECT_TIMEOUT_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "CRAWLDASH_REQUEST_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted state file.
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    /// Transport timeouts; unset or unparsable values leave them off.
    pub client: ClientSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let state_dir = lookup(ENV_STATE_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_destination =
            LogDestination::from_selector(lookup(ENV_LOG).as_deref(), Path::new(DEFAULT_LOG_FILE));
        let log_level = lookup(ENV_LOG_LEVEL)
            .as_deref()
            .and_then(parse_level)
            .unwrap_or(LevelFilter::Info);
        let client = ClientSettings {
            connect_timeout: millis(lookup(ENV_CONNECT_TIMEOUT_MS)),
            request_timeout: millis(lookup(ENV_REQUEST_TIMEOUT_MS)),
        };

        Self {
            state_dir,
            log_destination,
            log_level,
            client,
        }
    }
}

fn millis(raw: Option<String>) -> Option<Duration> {
    raw?.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.state_dir, PathBuf::from("."));
        assert_eq!(
            config.log_destination,
            LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
        );
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.client.connect_timeout, None);
        assert_eq!(config.client.request_timeout, None);
    }

    #[test]
    fn timeouts_are_read_in_milliseconds() {
        let config = config(&[
            (ENV_CONNECT_TIMEOUT_MS, "1500"),
            (ENV_REQUEST_TIMEOUT_MS, "soon"),
        ]);
        assert_eq!(config.client.connect_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.client.request_timeout, None);
    }

    #[test]
    fn environment_overrides() {
        let config = config(&[
            (ENV_STATE_DIR, "/tmp/crawldash"),
            (ENV_LOG, "terminal"),
            (ENV_LOG_LEVEL, "trace"),
        ]);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/crawldash"));
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn bad_level_falls_back_to_info() {
        assert_eq!(config(&[(ENV_LOG_LEVEL, "chatty")]).log_level, LevelFilter::Info);
    }
}
