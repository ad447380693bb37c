/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (IdentityResolver) → Router 組み立て
 * - HTTP middleware の適用
 * - axum::serve() で起動
 */
use std::panic;

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, HttpConfig};
use crate::services::auth::build_identity_resolver;
use crate::{api, middleware, state::AppState};

fn init_tracing() {
    // RUST_LOG=info,hello_bearer=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    // A panic only fails its own request (see middleware::http), so never abort here.
    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;

    let state = AppState::new(build_identity_resolver(&config));
    let app = build_router(state, &config.http);

    tracing::info!(addr = %config.addr, "starting server");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState, http: &HttpConfig) -> Router {
    async fn index() -> &'static str {
        "Welcome!\n"
    }

    let router = Router::new()
        .route("/", get(index))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    middleware::http::apply(router, http)
}
