/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: resolver: Arc<dyn IdentityResolver>
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::IdentityResolver;

#[derive(Clone, Debug)]
pub struct AppState {
    pub resolver: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }
}
