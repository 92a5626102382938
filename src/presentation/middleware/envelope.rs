// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::warn;

/// 包装响应负载
///
/// 对 JSON 对象：第一个键为处理器自己的 `status`（没有则省略），
/// 第二个键为 `creator`，之后按原顺序保留处理器的字段。
/// 处理器自带的 `creator` 优先于配置值。非对象原样返回。
pub fn wrap_payload(value: Value, creator: &str) -> Value {
    let Value::Object(fields) = value else {
        return value;
    };

    let mut wrapped = Map::with_capacity(fields.len() + 2);
    if let Some(status) = fields.get("status") {
        wrapped.insert("status".to_string(), status.clone());
    }
    wrapped.insert(
        "creator".to_string(),
        fields
            .get("creator")
            .cloned()
            .unwrap_or_else(|| Value::String(creator.to_string())),
    );
    for (key, field) in fields {
        if key != "status" && key != "creator" {
            wrapped.insert(key, field);
        }
    }
    Value::Object(wrapped)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

/// 响应信封中间件
///
/// 只处理 `application/json` 响应，其他类型直接放行
///
/// # 参数
///
/// * `creator` - 写入信封的 `creator` 值
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn envelope_middleware(
    State(creator): State<String>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response body: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let value: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    match serde_json::to_vec(&wrap_payload(value, &creator)) {
        Ok(body) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(body))
        }
        Err(e) => {
            warn!("Failed to serialize envelope: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
