// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::domain::models::video::{
    ChannelInfo, Comment, PageDesign, PlayerProbe, RelatedItem, VideoRecord,
};
use crate::domain::page::{element_text, PageQuery};
use crate::utils::text_processing::{count_from_label, remove_first};
use crate::utils::url_utils::{absolutize, canonical_short_url, is_video_id};

/// 布局探测锚点：标题直接位于 `#title` 容器下
pub const DESIGN_A_ANCHOR: &str = "#title > h1";

static STREAM_MAP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url=([^&]+)").expect("static regex"));

/// 单一布局下各字段的选择器
#[derive(Debug, Clone, Copy)]
pub struct DesignSelectors {
    pub title: &'static str,
    pub upload_date: &'static str,
    pub views: &'static str,
    pub like_button: &'static str,
    pub channel_name: &'static str,
    pub channel_link: &'static str,
    pub channel_avatar: &'static str,
    pub description: &'static str,
    pub hashtags: &'static str,
    pub expand_control: &'static str,
}

const DESIGN_A: DesignSelectors = DesignSelectors {
    title: "#title > h1",
    upload_date: "#description-inline-expander > yt-formatted-string span:nth-child(3)",
    views: "#description-inline-expander > yt-formatted-string span:nth-child(1)",
    like_button: "#top-row #top-level-buttons-computed > ytd-toggle-button-renderer:first-child #text",
    channel_name: "#owner #channel-name #text > a",
    channel_link: "#owner ytd-video-owner-renderer > a",
    channel_avatar: "#owner #avatar #img",
    description: "#description-inline-expander > yt-formatted-string",
    hashtags: "#super-title a",
    expand_control: "#description-inline-expander #expand",
};

const DESIGN_B: DesignSelectors = DesignSelectors {
    title: "#info-contents h1",
    upload_date: "#info-strings yt-formatted-string",
    views: "#info-text #count",
    like_button: "#menu #top-level-buttons-computed > ytd-toggle-button-renderer:first-child #text",
    channel_name: "ytd-video-owner-renderer #channel-name #text > a",
    channel_link: "ytd-video-owner-renderer > a",
    channel_avatar: "ytd-video-owner-renderer #avatar #img",
    description: "#meta #description",
    hashtags: "#info-contents .super-title a",
    expand_control: "#meta #more",
};

// Shared by both designs
const DURATION: &str = ".ytp-time-duration";
const RELATED_ITEM: &str = "ytd-compact-video-renderer";
const COMMENT_THREAD: &str = "#contents > ytd-comment-thread-renderer";

impl PageDesign {
    /// 该布局的选择器集合
    pub fn selectors(&self) -> &'static DesignSelectors {
        match self {
            PageDesign::DesignA => &DESIGN_A,
            PageDesign::DesignB => &DESIGN_B,
        }
    }
}

/// 判断详情页布局
///
/// 存在 `#title > h1` 即为 `DesignA`，否则为 `DesignB`，没有第三种结果
pub fn resolve_design<P: PageQuery + ?Sized>(page: &P) -> PageDesign {
    if page.exists(DESIGN_A_ANCHOR) {
        PageDesign::DesignA
    } else {
        PageDesign::DesignB
    }
}

/// 详情页字段抽取器
///
/// 对任意页面都是全函数：缺失的元素只会得到空串、0 或 `None`
pub struct VideoExtractor {
    base_url: String,
}

impl VideoExtractor {
    /// # 参数
    ///
    /// * `base_url` - 站点根地址，用于把相对链接补全为绝对地址
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// 按布局抽取视频详情
    pub fn extract<P: PageQuery + ?Sized>(&self, page: &P, design: PageDesign) -> VideoRecord {
        let s = design.selectors();

        let upload_date = page.text_or_empty(s.upload_date);
        let views_text = page.text_or_empty(s.views);
        let like_label = page.select_attr(s.like_button, "aria-label").unwrap_or_default();

        let description = match design {
            // The inline expander block also contains the views and date spans.
            PageDesign::DesignA => {
                let block = page.text_or_empty(s.description);
                let without_date = remove_first(&block, &upload_date);
                remove_first(&without_date, &views_text).trim().to_string()
            }
            PageDesign::DesignB => page.text_or_empty(s.description),
        };

        let record = VideoRecord {
            title: page.text_or_empty(s.title),
            description,
            duration_text: page.text_or_empty(DURATION),
            upload_date,
            view_count: count_from_label(&views_text),
            like_count: count_from_label(&like_label),
            channel: ChannelInfo {
                name: page.text_or_empty(s.channel_name),
                profile_url: absolutize(&self.base_url, page.select_attr(s.channel_link, "href").as_deref()),
                thumbnail_url: page.select_attr(s.channel_avatar, "src"),
            },
            hashtags: page
                .all(s.hashtags)
                .iter()
                .map(element_text)
                .collect(),
            related_items: self.related_items(page),
            comments: self.comments(page),
        };

        debug!(
            "Extracted video {:?} ({:?}): {} related, {} comments",
            record.title,
            design,
            record.related_items.len(),
            record.comments.len()
        );

        record
    }

    fn related_items<P: PageQuery + ?Sized>(&self, page: &P) -> Vec<RelatedItem> {
        page.all(RELATED_ITEM)
            .iter()
            .map(|item| RelatedItem {
                title: item.text_or_empty("#video-title"),
                url: absolutize(&self.base_url, item.select_attr("#thumbnail", "href").as_deref())
                    .unwrap_or_default(),
                channel_name: item.text_or_empty("#channel-name #text"),
                upload_date: item.text_or_empty("#metadata-line span:nth-child(2)"),
                view_count_text: item.text_or_empty("#metadata-line span:nth-child(1)"),
                duration_text: item.text_or_empty("#overlays #text"),
                thumbnail_url: item.select_attr("#img", "src"),
            })
            .collect()
    }

    fn comments<P: PageQuery + ?Sized>(&self, page: &P) -> Vec<Comment> {
        page.all(COMMENT_THREAD)
            .iter()
            .map(|thread| Comment {
                author: thread.text_or_empty("#author-text"),
                author_profile_url: absolutize(
                    &self.base_url,
                    thread.select_attr("#author-text", "href").as_deref(),
                )
                .unwrap_or_default(),
                date: thread.text_or_empty(".published-time-text"),
                like_count_text: thread.text_or_empty("#vote-count-middle"),
                body: thread.text_or_empty("#content-text"),
                author_avatar_url: thread.select_attr("#author-thumbnail #img", "src"),
            })
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// 解析预览地址
///
/// 按顺序尝试，命中即返回：
/// 1. `<video>` 元素的 `src`
/// 2. 旧版播放器配置的 stream map，取 `url=` 参数并做百分号解码
/// 3. 播放器对象返回的视频 ID，合成短链
/// 4. 当前页面地址中的 `v` 参数，合成短链
pub fn resolve_preview_url(probe: &PlayerProbe) -> Option<String> {
    if let Some(src) = non_empty(&probe.video_src) {
        return Some(src.to_string());
    }

    if let Some(map) = non_empty(&probe.stream_map) {
        if let Some(encoded) = STREAM_MAP_URL.captures(map).and_then(|c| c.get(1)) {
            match urlencoding::decode(encoded.as_str()) {
                Ok(decoded) => return Some(decoded.into_owned()),
                Err(e) => debug!("Undecodable stream map url: {}", e),
            }
        }
    }

    if let Some(id) = non_empty(&probe.player_video_id) {
        return Some(canonical_short_url(id));
    }

    let location = non_empty(&probe.location)?;
    let url = Url::parse(location).ok()?;
    url.query_pairs()
        .find(|(k, v)| k == "v" && is_video_id(v))
        .map(|(_, v)| canonical_short_url(&v))
}
