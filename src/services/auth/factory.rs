/// Factory: build the `IdentityResolver` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{Identity, IdentityResolver, InMemoryIdentityResolver};

pub fn build_identity_resolver(config: &Config) -> Arc<dyn IdentityResolver> {
    let resolver = InMemoryIdentityResolver::new(
        config
            .bearer_identities
            .iter()
            .map(|(token, subject)| (token.clone(), Identity::new(subject.clone()))),
    );

    if resolver.is_empty() {
        tracing::warn!("BEARER_IDENTITIES is empty; every bearer token will be rejected");
    } else {
        tracing::info!(identities = resolver.len(), "identity table loaded");
    }

    Arc::new(resolver)
}
