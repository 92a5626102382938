// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::domain::services::video_scraper::VideoScraper;
use crate::engines::traits::SessionLauncher;
use crate::infrastructure::mirror::MirrorDownloader;
use crate::infrastructure::shortener::LinkShortener;
use crate::infrastructure::youtube_client::YoutubeClient;

/// 请求间共享的只读状态
///
/// 启动时构建一次；每个请求各自打开浏览器会话，不共享可变状态
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub launcher: Arc<dyn SessionLauncher>,
    pub scraper: Arc<VideoScraper>,
    pub shortener: Arc<LinkShortener>,
    pub youtube: Arc<YoutubeClient>,
    pub mirror: Arc<MirrorDownloader>,
}

impl AppState {
    /// 根据配置构建共享状态
    ///
    /// # 参数
    ///
    /// * `settings` - 已加载的配置
    /// * `launcher` - 浏览器会话启动器
    ///
    /// # 返回值
    ///
    /// * `Ok(AppState)` - 构建成功
    /// * `Err` - HTTP 客户端或下载链接规则初始化失败
    pub fn new(settings: Arc<Settings>, launcher: Arc<dyn SessionLauncher>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.browser.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            scraper: Arc::new(VideoScraper::new(
                settings.browser.clone(),
                &settings.youtube.base_url,
            )),
            shortener: Arc::new(LinkShortener::new(client.clone(), &settings.shortener)),
            youtube: Arc::new(YoutubeClient::new(client.clone(), &settings.youtube)),
            mirror: Arc::new(MirrorDownloader::new(client, settings.downloads.clone())?),
            launcher,
            settings,
        })
    }
}
