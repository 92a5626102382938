// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::Html;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::models::search_result::SearchResult;
use crate::domain::page::{element_text, PageQuery};
use crate::utils::url_utils::{absolutize, internal_short_path, video_id_from_href};

const INITIAL_DATA_KEY: &str = "ytInitialData";
const SECTIONS_POINTER: &str =
    "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";

/// 列表页结果抽取器
///
/// 两条互为兜底的路径：
/// - 渲染后的 DOM（`ytd-video-renderer` 条目）
/// - 服务端渲染页面中内嵌的 `ytInitialData` 初始状态
///
/// 先走 DOM 路径，结果为空再解析初始状态
pub struct SearchExtractor {
    base_url: String,
}

impl SearchExtractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// 抽取搜索结果并附加内部下载地址
    pub fn extract_results(&self, html: &str) -> Vec<SearchResult> {
        let document = Html::parse_document(html);

        let mut results = self.extract_markup(&document);
        let mut used_strategy = "markup";

        if results.is_empty() {
            results = self.extract_initial_data(&document);
            used_strategy = "initial data";
        }

        for result in &mut results {
            if result.video_id.is_some() {
                result.download_url = Some(internal_short_path("download"));
            }
        }

        info!(
            "Parsed {} search results using {} strategy",
            results.len(),
            used_strategy
        );
        results
    }

    /// 从渲染后的 DOM 中抽取
    ///
    /// 缺少标题或地址的条目（广告、频道卡片等）被过滤掉
    pub fn extract_markup<P: PageQuery + ?Sized>(&self, page: &P) -> Vec<SearchResult> {
        page.all("ytd-video-renderer")
            .iter()
            .map(|item| {
                let href = item.select_attr("a#thumbnail, #thumbnail", "href");
                let meta = item.all("#metadata-line span");
                let (views_text, uploaded_text) = if meta.len() >= 2 {
                    (element_text(&meta[0]), element_text(&meta[1]))
                } else {
                    (String::new(), String::new())
                };

                SearchResult {
                    title: item.text_or_empty("#video-title"),
                    url: absolutize(&self.base_url, href.as_deref()).unwrap_or_default(),
                    channel: item.text_or_empty("#channel-info #channel-name #text"),
                    views_text,
                    uploaded_text,
                    duration_text: item.text_or_empty(
                        "#overlays #text, span.ytd-thumbnail-overlay-time-status-renderer",
                    ),
                    thumbnail_url: item.select_attr("#thumbnail img", "src"),
                    video_id: href.as_deref().and_then(video_id_from_href),
                    download_url: None,
                }
            })
            .filter(SearchResult::is_video)
            .collect()
    }

    /// 从内嵌的 `ytInitialData` 中抽取
    ///
    /// 解析失败只记录日志并返回空列表
    pub fn extract_initial_data<P: PageQuery + ?Sized>(&self, page: &P) -> Vec<SearchResult> {
        let script = page
            .all("script")
            .into_iter()
            .map(|s| s.text().collect::<String>())
            .find(|body| body.contains(INITIAL_DATA_KEY));

        let Some(script) = script else {
            debug!("No {} script on page", INITIAL_DATA_KEY);
            return Vec::new();
        };

        let Some(json) = slice_initial_data(&script) else {
            warn!("Could not locate {} object bounds", INITIAL_DATA_KEY);
            return Vec::new();
        };

        let data: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse {}: {}", INITIAL_DATA_KEY, e);
                return Vec::new();
            }
        };

        let Some(sections) = data.pointer(SECTIONS_POINTER).and_then(Value::as_array) else {
            return Vec::new();
        };

        sections
            .iter()
            .filter_map(|section| {
                section
                    .pointer("/itemSectionRenderer/contents")
                    .and_then(Value::as_array)
            })
            .flatten()
            .filter_map(|item| item.get("videoRenderer"))
            .filter_map(|video| self.from_video_renderer(video))
            .filter(SearchResult::is_video)
            .collect()
    }

    fn from_video_renderer(&self, video: &Value) -> Option<SearchResult> {
        let video_id = video.get("videoId").and_then(Value::as_str)?.to_string();
        let text_at = |pointer: &str| {
            video
                .pointer(pointer)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        let thumbnail_url = video
            .pointer("/thumbnail/thumbnails")
            .and_then(Value::as_array)
            .and_then(|thumbs| thumbs.last())
            .and_then(|t| t.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(SearchResult {
            title: text_at("/title/runs/0/text"),
            url: format!("{}/watch?v={}", self.base_url.trim_end_matches('/'), video_id),
            channel: text_at("/ownerText/runs/0/text"),
            views_text: text_at("/viewCountText/simpleText"),
            uploaded_text: text_at("/publishedTimeText/simpleText"),
            duration_text: text_at("/lengthText/simpleText"),
            thumbnail_url,
            video_id: Some(video_id),
            download_url: None,
        })
    }
}

/// 截取 `ytInitialData = {...};` 中的 JSON 对象
///
/// 从键之后的第一个 `{` 开始，到其后第一个 `};` 为止（包含 `}`）
pub fn slice_initial_data(script: &str) -> Option<&str> {
    let key_at = script.find(INITIAL_DATA_KEY)?;
    let rest = &script[key_at + INITIAL_DATA_KEY.len()..];
    let open = rest.find('{')?;
    let close = rest[open..].find("};")?;
    Some(&rest[open..open + close + 1])
}
