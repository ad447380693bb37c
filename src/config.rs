/*
 * Responsibility
 * - 環境変数の読み込み (HOST/PORT, HTTP limits, BEARER_IDENTITIES)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::services::auth::token;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub http: HttpConfig,
    /// `(token, subject)` pairs seeding the in-memory resolver.
    pub bearer_identities: Vec<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = match var("HOST") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("HOST"))?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let port: u16 = match var("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let mut http = HttpConfig::default();
        if let Some(s) = var("REQUEST_TIMEOUT_SECONDS") {
            let secs: u64 = s
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?;
            http.request_timeout = Duration::from_secs(secs);
        }
        if let Some(s) = var("REQUEST_BODY_LIMIT_BYTES") {
            http.body_limit_bytes = s
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?;
        }

        let bearer_identities = parse_identities(&var("BEARER_IDENTITIES").unwrap_or_default())?;

        Ok(Self {
            addr: SocketAddr::new(host, port),
            http,
            bearer_identities,
        })
    }
}

/// `token=subject,token=subject`. Blank entries are skipped.
fn parse_identities(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, subject) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("BEARER_IDENTITIES"))?;
            let (token, subject) = (token.trim(), subject.trim());

            // A token that could never be extracted from a request is a typo.
            if !token::is_token68(token) || subject.is_empty() {
                return Err(ConfigError::Invalid("BEARER_IDENTITIES"));
            }

            Ok((token.to_owned(), subject.to_owned()))
        })
        .collect()
}
