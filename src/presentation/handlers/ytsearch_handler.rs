// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Json;
use serde_json::{json, Value};

use crate::presentation::errors::ApiError;
use crate::presentation::handlers::{param, timestamp};
use crate::presentation::registry::{HttpMethod, QueryParams, RouteHandler, RouteMeta};
use crate::presentation::state::AppState;

/// 最多返回的结果数
pub const MAX_RESULTS: usize = 3;

/// 不经浏览器的快速搜索
pub struct YtSearchHandler;

#[async_trait]
impl RouteHandler for YtSearchHandler {
    fn meta(&self) -> RouteMeta {
        RouteMeta {
            name: "YTsearch",
            description: "Search YouTube videos and return top 3 results",
            method: HttpMethod::Get,
            path_template: "/ytsearch?query=",
            category: "Social",
            author: "Priyanshi Kaur",
            version: "1.0.0",
        }
    }

    async fn handle(&self, state: AppState, params: QueryParams) -> Result<Json<Value>, ApiError> {
        let query = param(&params, "query")
            .ok_or_else(|| ApiError::InvalidInput("Query parameter is required".to_string()))?;

        let mut results = state.youtube.search(query).await?;
        if results.is_empty() {
            return Err(ApiError::ExtractionEmpty(
                "No results found or unable to parse YouTube results".to_string(),
            ));
        }
        results.truncate(MAX_RESULTS);

        Ok(Json(json!({
            "status": true,
            "query": query,
            "results": results,
            "timestamp": timestamp(),
        })))
    }
}
