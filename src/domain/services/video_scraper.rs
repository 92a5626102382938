// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::settings::BrowserSettings;
use crate::domain::models::search_result::SearchResult;
use crate::domain::models::video::{PageDesign, ScrapedVideo};
use crate::domain::services::search_extractor::SearchExtractor;
use crate::domain::services::video_extractor::{resolve_design, resolve_preview_url, VideoExtractor};
use crate::engines::traits::{BrowserSession, EngineError};

/// 详情页主内容容器
pub const PRIMARY_CONTAINER: &str = "#contents";
/// 懒加载滚动容器
pub const SCROLL_CONTAINER: &str = "ytd-app";
/// 搜索结果条目
pub const SEARCH_ITEM: &str = "ytd-video-renderer";

/// 滚动加载参数
#[derive(Debug, Clone, Copy)]
pub struct ScrollPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl From<&BrowserSettings> for ScrollPolicy {
    fn from(settings: &BrowserSettings) -> Self {
        Self {
            delay: settings.scroll_delay(),
            max_attempts: settings.scroll_max_attempts,
        }
    }
}

/// 增量滚动加载
///
/// 反复把容器滚动到当前最大高度，等待固定时间后比较高度；
/// 高度不再增长或达到次数上限即停止。只是尽力加载，不保证内容完整。
///
/// # 返回值
///
/// 实际执行的滚动次数
pub async fn load_incrementally(
    session: &dyn BrowserSession,
    container: &str,
    policy: ScrollPolicy,
) -> u32 {
    let mut last = match session.scroll_extent(container).await {
        Ok(h) => h,
        Err(e) => {
            warn!("Could not read scroll extent of {}: {}", container, e);
            return 0;
        }
    };

    let mut attempts = 0;
    while attempts < policy.max_attempts {
        if let Err(e) = session.scroll_to_end(container).await {
            warn!("Scroll failed: {}", e);
            break;
        }
        tokio::time::sleep(policy.delay).await;

        let current = match session.scroll_extent(container).await {
            Ok(h) => h,
            Err(e) => {
                warn!("Could not read scroll extent of {}: {}", container, e);
                break;
            }
        };
        if current == last {
            break;
        }
        last = current;
        attempts += 1;
    }

    debug!("Incremental loading stopped after {} scrolls", attempts);
    attempts
}

fn detect_design(html: &str) -> PageDesign {
    resolve_design(&Html::parse_document(html))
}

/// 详情页与搜索页的浏览器抓取流程
///
/// 每一步都在同一个会话上顺序执行；DOM 快照只在同步作用域内解析
pub struct VideoScraper {
    settings: BrowserSettings,
    extractor: VideoExtractor,
    search_extractor: SearchExtractor,
}

impl VideoScraper {
    pub fn new(settings: BrowserSettings, base_url: &str) -> Self {
        Self {
            settings,
            extractor: VideoExtractor::new(base_url),
            search_extractor: SearchExtractor::new(base_url),
        }
    }

    /// 抓取详情页
    ///
    /// 导航 → 等待主容器 → 判断布局 → 展开简介（尽力） → 滚动加载 → 探测预览地址 → 抽取字段
    pub async fn scrape(
        &self,
        session: &dyn BrowserSession,
        url: &str,
    ) -> Result<ScrapedVideo, EngineError> {
        info!("Scraping video page: {}", url);
        session.navigate(url).await?;
        session
            .wait_for(PRIMARY_CONTAINER, self.settings.selector_timeout())
            .await?;

        let design = detect_design(&session.content().await?);
        debug!("Resolved page design: {:?}", design);

        if let Err(e) = session.click(design.selectors().expand_control).await {
            warn!("Could not expand description ({:?}): {}", design, e);
        }

        load_incrementally(session, SCROLL_CONTAINER, ScrollPolicy::from(&self.settings)).await;

        let preview_url = match session.probe_player().await {
            Ok(probe) => resolve_preview_url(&probe),
            Err(e) => {
                warn!("Player probe failed: {}", e);
                None
            }
        };

        let html = session.content().await?;
        let record = self
            .extractor
            .extract(&Html::parse_document(&html), design);

        Ok(ScrapedVideo {
            record,
            preview_url,
        })
    }

    /// 在浏览器中执行搜索并抽取结果
    pub async fn search(
        &self,
        session: &dyn BrowserSession,
        search_url: &str,
    ) -> Result<Vec<SearchResult>, EngineError> {
        info!("Searching: {}", search_url);
        session.navigate(search_url).await?;
        session
            .wait_for(SEARCH_ITEM, self.settings.selector_timeout())
            .await?;

        let html = session.content().await?;
        Ok(self.search_extractor.extract_results(&html))
    }
}
