//! Configuration parsed from environment variables.

use std::time::Duration;

use usergate_session::{Mode, SessionConfig};

use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/user";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const MODE_VAR: &str = "USERGATE_MODE";
const API_URL_VAR: &str = "USERGATE_API_URL";
const REQUEST_TIMEOUT_VAR: &str = "USERGATE_REQUEST_TIMEOUT_SECS";
const CONNECT_TIMEOUT_VAR: &str = "USERGATE_CONNECT_TIMEOUT_SECS";

/// Everything needed to build a session store talking to a real
/// identity API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub api_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `USERGATE_MODE`: `development`/`dev` or `production`/`prod`;
    ///   defaults to the build profile (debug → development)
    /// - `USERGATE_API_URL`: identity API base URL, default
    ///   `http://127.0.0.1:8080/api/user`
    /// - `USERGATE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `USERGATE_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mode = match lookup(MODE_VAR) {
            Some(raw) => raw.parse::<Mode>().map_err(|source| {
                ConfigError::InvalidMode {
                    var: MODE_VAR,
                    source,
                }
            })?,
            None => Mode::from_build_profile(),
        };

        let api_url = lookup(API_URL_VAR)
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if api_url.is_empty() {
            return Err(ConfigError::EmptyUrl { var: API_URL_VAR });
        }

        let request_timeout = parse_secs(
            &lookup,
            REQUEST_TIMEOUT_VAR,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let connect_timeout = parse_secs(
            &lookup,
            CONNECT_TIMEOUT_VAR,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            mode,
            api_url,
            request_timeout,
            connect_timeout,
        })
    }

    /// The part of the config the session store itself cares about.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig { mode: self.mode }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::from_build_profile(),
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}
