//! HTTP server: JSON API, media files and the single-page client

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::content::{
    Category, ContentError, ContentScanner, HomeConfig, NavPage, Work, WorkDetail,
};
use crate::Folio;

type SharedScanner = Arc<ContentScanner>;

/// Error answered to API clients as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Internal(&'static str),
}

impl ApiError {
    fn from_content(err: ContentError, not_found: &'static str, internal: &'static str) -> Self {
        if err.is_not_found() {
            tracing::debug!("{}", err);
            ApiError::NotFound(not_found)
        } else {
            tracing::error!("{}: {}", internal, err);
            ApiError::Internal(internal)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct WorksQuery {
    search: Option<String>,
}

/// Build the application router
///
/// The content root is mounted under the renderer's media prefix so that
/// every URL the scanner hands out resolves. Unknown paths fall back to the
/// client's `index.html` for client-side routing.
pub fn router(scanner: SharedScanner, client_dir: &std::path::Path) -> Router {
    let media_prefix = scanner.renderer().media_prefix().to_string();
    let media = ServeDir::new(scanner.root());
    let client = ServeDir::new(client_dir).fallback(ServeFile::new(client_dir.join("index.html")));

    let api = Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:category/works", get(list_works))
        .route("/api/categories/:category/works/:work", get(get_work))
        .route("/api/works", get(list_all_works))
        .route("/api/works/recommended", get(list_recommended))
        .route("/api/home", get(get_home))
        .route("/api/nav-pages", get(list_nav_pages))
        .route("/api/pages/:page", get(get_page))
        .with_state(scanner);

    let app = if media_prefix.is_empty() {
        tracing::warn!("Empty media prefix, content files are not served");
        api
    } else {
        api.nest_service(&media_prefix, media)
    };

    app.fallback_service(client)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the server and run until Ctrl+C
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let scanner = folio.scanner();
    scanner.ensure_root().await?;
    tracing::info!("Serving content from {:?}", scanner.root());

    let app = router(Arc::new(scanner), &folio.client_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
    tracing::info!("Shutting down");
}

async fn list_categories(State(scanner): State<SharedScanner>) -> Json<Vec<Category>> {
    Json(scanner.list_categories().await)
}

async fn list_works(
    State(scanner): State<SharedScanner>,
    Path(category): Path<String>,
) -> Json<Vec<Work>> {
    Json(scanner.list_works(&category).await)
}

async fn get_work(
    State(scanner): State<SharedScanner>,
    Path((category, work)): Path<(String, String)>,
) -> Result<Json<WorkDetail>, ApiError> {
    scanner
        .get_work_detail(&category, &work)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_content(e, "作品不存在", "获取作品详情失败"))
}

async fn list_all_works(
    State(scanner): State<SharedScanner>,
    Query(query): Query<WorksQuery>,
) -> Json<Vec<Work>> {
    let search = query.search.unwrap_or_default();
    Json(scanner.search_works(&search).await)
}

async fn list_recommended(State(scanner): State<SharedScanner>) -> Json<Vec<Work>> {
    Json(scanner.list_recommended().await)
}

async fn get_home(State(scanner): State<SharedScanner>) -> Json<Option<HomeConfig>> {
    Json(scanner.get_home_config().await)
}

async fn list_nav_pages(State(scanner): State<SharedScanner>) -> Json<Vec<NavPage>> {
    Json(scanner.list_nav_pages().await)
}

async fn get_page(
    State(scanner): State<SharedScanner>,
    Path(page): Path<String>,
) -> Result<Json<NavPage>, ApiError> {
    scanner
        .get_nav_page(&page)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_content(e, "页面不存在", "获取页面失败"))
}
