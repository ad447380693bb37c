/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer が必要な route は authorize_bearer で包む
 */
use axum::{Router, routing::get};

use crate::middleware::auth::authorize_bearer;
use crate::state::AppState;

use crate::api::v1::handlers::{
    greet::{hello, hello_internal},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/hello/{name}", get(hello))
        .route("/hellointernal/{greet}", get(authorize_bearer(hello_internal)))
}
