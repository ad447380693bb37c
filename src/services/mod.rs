/*
 * Responsibility
 * - Domain services (no axum routing here)
 */
pub mod auth;
