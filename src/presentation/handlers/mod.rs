// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器实现 `RouteHandler`，由注册表挂载到 `/api` 下
pub mod capcut_handler;
pub mod youtube_handler;
pub mod ytsearch_handler;

use chrono::{SecondsFormat, Utc};

use crate::presentation::registry::QueryParams;

/// 响应时间戳，RFC 3339 UTC，毫秒精度
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 取非空的查询参数
pub(crate) fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
