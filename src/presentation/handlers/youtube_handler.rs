// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::models::video::ScrapedVideo;
use crate::engines::traits::{BrowserSession, EngineError};
use crate::infrastructure::youtube_client::search_url;
use crate::presentation::errors::ApiError;
use crate::presentation::handlers::{param, timestamp};
use crate::presentation::registry::{HttpMethod, QueryParams, RouteHandler, RouteMeta};
use crate::presentation::state::AppState;
use crate::utils::url_utils::{
    canonical_short_url, internal_short_path, is_watch_url, platform_video_id,
};

/// 视频详情 / 浏览器搜索
///
/// `url` 优先于 `query`；每个请求独占一个浏览器会话
pub struct YoutubeHandler;

/// 关闭会话，失败只记录日志
async fn release(session: Box<dyn BrowserSession>) {
    if let Err(e) = session.close().await {
        warn!("Error closing browser session: {}", e);
    }
}

async fn scrape_video(state: &AppState, url: &str) -> Result<ScrapedVideo, EngineError> {
    let session = state.launcher.open().await?;
    let outcome = state.scraper.scrape(session.as_ref(), url).await;
    release(session).await;
    outcome
}

async fn video_info(state: &AppState, url: &str) -> Result<Value, ApiError> {
    let scraped = scrape_video(state, url).await?;

    let preview_url = match scraped.preview_url.as_deref() {
        Some(preview) => {
            info!("Original preview URL: {}", preview);
            Some(state.shortener.shorten(preview).await)
        }
        None => platform_video_id(url).map(|id| canonical_short_url(&id)),
    };
    info!("Final preview URL: {:?}", preview_url);

    let mut data = serde_json::to_value(&scraped.record)
        .map_err(|e| ApiError::Unknown(e.to_string()))?;
    if let Value::Object(fields) = &mut data {
        fields.insert("previewUrl".to_string(), json!(preview_url));
    }

    Ok(json!({
        "type": "video_info",
        "url": url,
        "download_url": internal_short_path("download"),
        "preview_url": preview_url,
        "data": data,
    }))
}

async fn search_results(state: &AppState, query: &str) -> Result<Value, ApiError> {
    let session = state.launcher.open().await?;
    let outcome = state
        .scraper
        .search(
            session.as_ref(),
            &search_url(&state.settings.youtube.base_url, query),
        )
        .await;
    release(session).await;
    let results = outcome?;

    Ok(json!({
        "type": "search_results",
        "query": query,
        "data": results,
    }))
}

#[async_trait]
impl RouteHandler for YoutubeHandler {
    fn meta(&self) -> RouteMeta {
        RouteMeta {
            name: "Youtube",
            description:
                "API to search YouTube or scrape detailed information from YouTube video pages",
            method: HttpMethod::Get,
            path_template: "/youtube?query=&url=",
            category: "Downloader",
            author: "Mr-Perfect",
            version: "1.0.0",
        }
    }

    async fn handle(&self, state: AppState, params: QueryParams) -> Result<Json<Value>, ApiError> {
        let result = match (param(&params, "url"), param(&params, "query")) {
            (Some(url), _) => {
                if !is_watch_url(url) {
                    return Err(ApiError::InvalidInput(
                        "Invalid YouTube video URL".to_string(),
                    ));
                }
                video_info(&state, url).await?
            }
            (None, Some(query)) => search_results(&state, query).await?,
            (None, None) => {
                return Err(ApiError::InvalidInput(
                    "Either URL or query parameter is required".to_string(),
                ))
            }
        };

        Ok(Json(json!({
            "status": true,
            "timestamp": timestamp(),
            "result": result,
        })))
    }
}
