use crate::component::VideoEntry;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// 路由共用的狀態；目錄建立後就不再修改，只需唯讀共享
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<VideoEntry>>,
}

/// 建立 HTTP 路由
///
///   GET /video        — 整份影片目錄（JSON 陣列）
///   GET /thumb/{file} — 縮圖資料夾中的靜態檔案
///   其他路徑          — 前端靜態檔案
pub fn build_router(
    catalog: Arc<Vec<VideoEntry>>,
    thumbnail_dir: &Path,
    static_dir: &Path,
) -> Router {
    Router::new()
        .route("/video", get(list_videos))
        .nest_service("/thumb", ServeDir::new(thumbnail_dir))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(log_request))
        .with_state(AppState { catalog })
}

async fn list_videos(State(state): State<AppState>) -> Response {
    Json(state.catalog.as_slice()).into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    debug!("{method} {uri} -> {}", response.status());
    response
}
