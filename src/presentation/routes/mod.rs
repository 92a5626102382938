// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::presentation::middleware::envelope::envelope_middleware;
use crate::presentation::registry::{CatalogCategory, RegistryError, RouteRegistry, INFO_PATH};
use crate::presentation::state::AppState;

/// 创建应用路由
///
/// 挂载注册表中的全部处理器、`/api/info` 目录、`/downloads` 静态目录和 JSON 404，
/// 所有 JSON 响应都经过信封中间件
///
/// # 返回值
///
/// * `Ok(Router)` - 配置好的路由
/// * `Err(RegistryError)` - 处理器路由冲突
pub fn create_app(state: AppState) -> Result<Router, RegistryError> {
    let registry = RouteRegistry::with_defaults()?;
    Ok(build_router(state, &registry))
}

/// 用给定的注册表组装路由
pub fn build_router(state: AppState, registry: &RouteRegistry) -> Router {
    let catalog = Arc::new(registry.catalog());
    let creator = state.settings.api.creator.clone();
    let downloads = ServeDir::new(&state.settings.downloads.dir);

    Router::new()
        .route(INFO_PATH, get(move || info(catalog.clone())))
        .merge(registry.mount())
        .nest_service("/downloads", downloads)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(creator, envelope_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 接口目录
async fn info(catalog: Arc<Vec<CatalogCategory>>) -> impl IntoResponse {
    Json(json!({ "categories": catalog.as_ref() }))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    warn!("404 Not Found: {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": false, "error": "Not Found" })),
    )
}
