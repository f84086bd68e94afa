//! Configuration module for the petition client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ClientError;

pub const DEFAULT_API_URL: &str = "https://seng365.csse.canterbury.ac.nz/api/v1";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin including the version prefix, without a trailing slash
    pub api_url: String,
    /// Path to the SQLite file holding the session
    pub session_path: PathBuf,
    /// Petitions per page on the explore screen
    pub explore_page_size: usize,
    /// Petitions per page on secondary lists
    pub list_page_size: usize,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: PathBuf::from("./data/session.sqlite"),
            explore_page_size: 8,
            list_page_size: 4,
            request_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("PETITION_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let session_path = env::var("PETITION_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_path);

        let explore_page_size =
            parse_var("PETITION_EXPLORE_PAGE_SIZE")?.unwrap_or(defaults.explore_page_size);
        let list_page_size =
            parse_var("PETITION_LIST_PAGE_SIZE")?.unwrap_or(defaults.list_page_size);
        if explore_page_size == 0 || list_page_size == 0 {
            return Err(ClientError::Config("page sizes must be at least 1".to_string()));
        }

        let request_timeout = parse_var::<u64>("PETITION_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let log_level = env::var("PETITION_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            api_url,
            session_path,
            explore_page_size,
            list_page_size,
            request_timeout,
            log_level,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, ClientError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("Invalid {} value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
