// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 详情页布局
///
/// 上游站点会对详情页做 A/B 测试，两种布局使用不同的选择器集合。
/// 只在一次抓取中使用，不做持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDesign {
    /// 新版布局（存在 `#title > h1`）
    DesignA,
    /// 旧版布局
    DesignB,
}

/// 视频详情
///
/// 每次详情页抓取生成一次，响应发送后丢弃。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub title: String,
    pub description: String,
    pub duration_text: String,
    pub upload_date: String,
    pub view_count: u64,
    pub like_count: u64,
    pub channel: ChannelInfo,
    pub hashtags: Vec<String>,
    pub related_items: Vec<RelatedItem>,
    pub comments: Vec<Comment>,
}

/// 频道信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub name: String,
    pub profile_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// 推荐视频
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedItem {
    pub title: String,
    pub url: String,
    pub channel_name: String,
    pub upload_date: String,
    pub view_count_text: String,
    pub duration_text: String,
    pub thumbnail_url: Option<String>,
}

/// 评论
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub author_profile_url: String,
    pub date: String,
    pub like_count_text: String,
    pub body: String,
    pub author_avatar_url: Option<String>,
}

/// 播放器探测结果
///
/// 从运行中的页面读取的原始信息，用于解析预览地址。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProbe {
    /// `<video>` 元素的 `src`
    pub video_src: Option<String>,
    /// 旧版播放器配置中的 `url_encoded_fmt_stream_map`
    pub stream_map: Option<String>,
    /// 播放器对象返回的视频 ID
    pub player_video_id: Option<String>,
    /// 当前页面地址
    pub location: Option<String>,
}

/// 一次详情抓取的结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedVideo {
    pub record: VideoRecord,
    pub preview_url: Option<String>,
}
