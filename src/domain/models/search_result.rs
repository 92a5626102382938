// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 搜索结果条目
///
/// 顺序与列表页展示顺序一致
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub channel: String,
    pub views_text: String,
    pub uploaded_text: String,
    pub duration_text: String,
    pub thumbnail_url: Option<String>,
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl SearchResult {
    /// 缺少标题或地址的条目视为非视频占位项
    pub fn is_video(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}
