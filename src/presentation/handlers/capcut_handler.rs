// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::presentation::errors::ApiError;
use crate::presentation::handlers::{param, timestamp};
use crate::presentation::registry::{HttpMethod, QueryParams, RouteHandler, RouteMeta};
use crate::presentation::state::AppState;

/// CapCut 模板视频下载
pub struct CapcutHandler;

#[async_trait]
impl RouteHandler for CapcutHandler {
    fn meta(&self) -> RouteMeta {
        RouteMeta {
            name: "CapCutDownloader",
            description: "Fetch CapCut video information and provide direct download link",
            method: HttpMethod::Get,
            path_template: "/capcut?url=",
            category: "downloader",
            author: "Mr-Perfect",
            version: "1.2.0",
        }
    }

    async fn handle(&self, state: AppState, params: QueryParams) -> Result<Json<Value>, ApiError> {
        let url = param(&params, "url")
            .ok_or_else(|| ApiError::InvalidInput("URL parameter is required".to_string()))?;

        info!("Processing URL: {}", url);
        let media_url = state.mirror.resolve(url).await?;
        let download_url = state.mirror.download(&media_url).await?;

        Ok(Json(json!({
            "status": true,
            "downloadUrl": download_url,
            "timestamp": timestamp(),
        })))
    }
}
