use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::token::BearerToken;

/// The authenticated principal a bearer token stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// The backend could not answer at all. "Unknown token" is `Ok(None)`, not this.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

/// Maps a syntactically valid token to an identity.
///
/// Implementations own their storage and any locking it needs; callers
/// resolve at most once per request.
#[async_trait]
pub trait IdentityResolver: fmt::Debug + Send + Sync {
    async fn resolve(&self, token: &BearerToken) -> Result<Option<Identity>, ResolveError>;
}
