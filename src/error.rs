/*
 * Responsibility
 * - アプリ共通の AppError / AuthError 定義
 * - IntoResponse 実装
 *   - AuthError: RFC 6750 の WWW-Authenticate challenge (body なし)
 *   - それ以外: JSON error body
 */
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::ExtractError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Why a request failed bearer authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("bearer credential required")]
    MissingCredential,
    #[error("bearer credential is malformed")]
    MalformedCredential,
    #[error("bearer credential does not resolve to an identity")]
    UnresolvedCredential,
}

impl AuthError {
    pub fn status(self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::UnresolvedCredential => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::MalformedCredential => StatusCode::BAD_REQUEST,
        }
    }

    /// `WWW-Authenticate` value for this failure.
    pub fn challenge(self) -> &'static str {
        match self {
            AuthError::MissingCredential => r#"Bearer realm="""#,
            AuthError::MalformedCredential => r#"Bearer error="invalid_request""#,
            AuthError::UnresolvedCredential => r#"Bearer error="invalid_token""#,
        }
    }
}

impl From<ExtractError> for AuthError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::MissingCredential => AuthError::MissingCredential,
            ExtractError::MalformedCredential => AuthError::MalformedCredential,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::WWW_AUTHENTICATE, self.challenge())],
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Auth(err) => return err.into_response(),
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}
