/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: route 単位の Bearer 認可, http: Router 全体に掛ける layer
 */
pub mod auth;
pub mod http;
