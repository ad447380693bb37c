/*
 * Responsibility
 * - Fixed token → Identity table, seeded once at startup
 * - Read-only after construction, so it is shared via Arc without locks
 */
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::services::auth::{BearerToken, Identity, IdentityResolver, ResolveError};

#[derive(Default)]
pub struct InMemoryIdentityResolver {
    identities: HashMap<String, Identity>,
}

impl InMemoryIdentityResolver {
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, Identity)>,
        T: Into<String>,
    {
        Self {
            identities: entries
                .into_iter()
                .map(|(token, identity)| (token.into(), identity))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

// Tokens are secrets; only the table size is printed.
impl fmt::Debug for InMemoryIdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryIdentityResolver")
            .field("identities", &self.identities.len())
            .finish()
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn resolve(&self, token: &BearerToken) -> Result<Option<Identity>, ResolveError> {
        Ok(self.identities.get(token.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves() {
        let resolver = InMemoryIdentityResolver::new([("aaaaa", Identity::new("alice"))]);

        let identity = resolver
            .resolve(&BearerToken::new_unchecked("aaaaa"))
            .await
            .unwrap();

        assert_eq!(identity, Some(Identity::new("alice")));
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let resolver = InMemoryIdentityResolver::new([("aaaaa", Identity::new("alice"))]);

        let identity = resolver
            .resolve(&BearerToken::new_unchecked("bbbbb"))
            .await
            .unwrap();

        assert_eq!(identity, None);
    }

    #[test]
    fn debug_hides_tokens() {
        let resolver = InMemoryIdentityResolver::new([("secret", Identity::new("alice"))]);
        let printed = format!("{resolver:?}");

        assert!(!printed.contains("secret"));
        assert!(printed.contains("identities: 1"));
        assert_eq!(resolver.len(), 1);
    }
}
