// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::info;

use crate::config::settings::YoutubeSettings;
use crate::domain::models::search_result::SearchResult;
use crate::domain::services::search_extractor::SearchExtractor;
use crate::engines::traits::EngineError;

/// 搜索页地址 `<base>/results?search_query=<query>`
pub fn search_url(base_url: &str, query: &str) -> String {
    format!(
        "{}/results?search_query={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(query)
    )
}

/// 不经浏览器、直接抓取服务端渲染的搜索页
pub struct YoutubeClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    timeout: Duration,
    extractor: SearchExtractor,
}

impl YoutubeClient {
    pub fn new(client: reqwest::Client, settings: &YoutubeSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.clone(),
            user_agent: settings.user_agent.clone(),
            timeout: Duration::from_millis(settings.request_timeout_ms),
            extractor: SearchExtractor::new(settings.base_url.as_str()),
        }
    }

    pub async fn fetch_search_page(&self, query: &str) -> Result<String, EngineError> {
        let url = search_url(&self.base_url, query);
        info!("Fetching search page: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, self.user_agent.as_str())
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// 抓取搜索页并抽取结果
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EngineError> {
        let html = self.fetch_search_page(query).await?;
        Ok(self.extractor.extract_results(&html))
    }
}
