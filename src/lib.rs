//! Blog API - library for app logic and testing

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;
pub mod store;
pub mod validation;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::store::{BlogPostStore, InMemoryStore, PgBlogPostStore};

/// Shared handler state. The store is injected here, never global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogPostStore>,
}

/// CORS for the configured origins.
pub fn configure_cors(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Create and configure the application router.
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            "/blog/posts",
            get(routes::blog::list_posts)
                .post(routes::blog::create_post)
                .put(routes::blog::update_post)
                .patch(routes::blog::patch_post)
                .delete(routes::blog::delete_post),
        )
        .route("/blog/posts/{id}", get(routes::blog::get_post))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// PostgreSQL when a database is configured and reachable, otherwise the
/// in-memory store.
pub async fn connect_store(config: &ServerConfig) -> Arc<dyn BlogPostStore> {
    let Some(db_config) = &config.database else {
        tracing::info!("DATABASE_URL not set. Using in-memory store.");
        return Arc::new(InMemoryStore::new());
    };

    let pool = match db::init_pool(db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(
                "Failed to initialize database pool: {}. Falling back to in-memory store.",
                e
            );
            return Arc::new(InMemoryStore::new());
        }
    };

    if let Err(e) = db::ensure_schema(&pool).await {
        tracing::error!("Failed to create blog_posts table: {}", e);
    }

    Arc::new(PgBlogPostStore::new(pool))
}

/// Run the server (used by main).
pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Dropping the guards stops the background log writers.
    let _log_guards = logging::init(&config.logging);

    routes::health::init_start_time();

    let addr = config.socket_addr().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid HOST/PORT configuration: {e}"),
        )
    })?;

    let store = connect_store(&config).await;
    tracing::info!(backend = store.backend(), "store ready");

    let app = create_app(AppState { store }, configure_cors(config.allowed_origins.clone()));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_app(
            AppState {
                store: Arc::new(InMemoryStore::new()),
            },
            configure_cors(vec![HeaderValue::from_static("http://localhost:3000")]),
        )
    }

    #[tokio::test]
    async fn test_app_serves_blog_routes_with_request_id() {
        let req = Request::get("/blog/posts").body(Body::empty()).unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_returns_not_found() {
        let req = Request::get("/api/nothing").body(Body::empty()).unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_connect_store_without_database_uses_memory() {
        let config = ServerConfig {
            database: None,
            ..ServerConfig::from_env()
        };
        let store = connect_store(&config).await;
        assert_eq!(store.backend(), "memory");
    }
}
