/*
 * Responsibility
 * - GET /hello/{name}: 公開 greeting
 * - GET /hellointernal/{greet}: Bearer 認可済み greeting (Identity を受け取る)
 */
use axum::{
    RequestPartsExt,
    extract::{Path, Request},
};

use crate::error::AppError;
use crate::services::auth::Identity;

pub async fn hello(Path(name): Path<String>) -> String {
    format!("hello, {name}!\n")
}

/// Wrapped by `authorize_bearer`, so it receives the whole request plus the caller.
pub async fn hello_internal(req: Request, identity: Identity) -> Result<String, AppError> {
    let (mut parts, _body) = req.into_parts();
    let Path(greet) = parts
        .extract::<Path<String>>()
        .await
        .map_err(|rejection| AppError::bad_request("INVALID_PATH", rejection.body_text()))?;

    Ok(format!("{greet}, {}!\n", identity.subject))
}
