//! Bearer authorization for individual routes.
//!
//! `authorize_bearer` wraps a handler that needs the caller's [`Identity`] and
//! turns it into a plain axum handler:
//!
//! ```ignore
//! Router::new().route("/hellointernal/{greet}", get(authorize_bearer(hello_internal)))
//! ```
//!
//! Per request: extract token → (challenge | resolve) → (invalid_token | handler).
//! The resolver is called at most once, and only for a well-formed token.

use std::{future::Future, pin::Pin};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AuthError};
use crate::services::auth::{Identity, IdentityResolver, token};
use crate::state::AppState;

pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Extract the bearer token and resolve it to an identity.
pub async fn authenticate(
    headers: &HeaderMap,
    uri: &Uri,
    resolver: &dyn IdentityResolver,
) -> Result<Identity, AppError> {
    let token = token::extract(headers, uri).map_err(|err| {
        tracing::warn!(reason = %err, "bearer authentication rejected");
        AuthError::from(err)
    })?;

    match resolver.resolve(&token).await {
        Ok(Some(identity)) => Ok(identity),
        Ok(None) => {
            tracing::warn!("bearer token does not match any identity");
            Err(AuthError::UnresolvedCredential.into())
        }
        Err(err) => {
            tracing::error!(error = %err, "identity resolution failed");
            Err(AppError::Internal)
        }
    }
}

/// Wrap `handler` so it only runs for requests carrying a resolvable bearer token.
///
/// Failures answer with the matching `WWW-Authenticate` challenge. On success
/// the handler's response is returned as is.
pub fn authorize_bearer<H, Fut, R>(
    handler: H,
) -> impl Fn(State<AppState>, Request) -> ResponseFuture + Clone + Send + Sync + 'static
where
    H: Fn(Request, Identity) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    move |State(state): State<AppState>, req: Request| -> ResponseFuture {
        let handler = handler.clone();
        Box::pin(async move {
            // Body is not Sync; only the parts are borrowed across the lookup.
            let (parts, body) = req.into_parts();

            let identity =
                match authenticate(&parts.headers, &parts.uri, state.resolver.as_ref()).await {
                    Ok(identity) => identity,
                    Err(err) => return err.into_response(),
                };

            tracing::debug!(subject = %identity.subject, "bearer authentication succeeded");

            handler(Request::from_parts(parts, body), identity)
                .await
                .into_response()
        })
    }
}
