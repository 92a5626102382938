// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::settings::ShortenerSettings;
use crate::engines::traits::EngineError;
use crate::utils::url_utils::{canonical_short_url, platform_video_id};

/// 短链适配器
///
/// 先把地址规范化，再交给外部短链服务；服务不可用时退回规范化后的地址，
/// 因此 `shorten` 永远不会失败。
pub struct LinkShortener {
    client: reqwest::Client,
    endpoint: String,
    short_url_prefix: String,
    timeout: Duration,
}

impl LinkShortener {
    pub fn new(client: reqwest::Client, settings: &ShortenerSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            short_url_prefix: settings.short_url_prefix.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }

    /// 规范化地址
    ///
    /// - 平台观看地址且带 `v` 参数：`https://youtu.be/<id>`
    /// - 其他地址：去掉查询串，保留片段
    /// - 无法解析：原样返回
    pub fn canonicalize(raw: &str) -> String {
        let mut url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                debug!("Leaving unparseable url untouched ({}): {}", e, raw);
                return raw.to_string();
            }
        };

        if let Some(id) = platform_video_id(raw) {
            return canonical_short_url(&id);
        }

        url.set_query(None);
        url.to_string()
    }

    /// 生成短链，失败时返回规范化后的地址
    pub async fn shorten(&self, long_url: &str) -> String {
        let canonical = Self::canonicalize(long_url);

        if canonical.is_empty() || !canonical.starts_with("http") {
            warn!("Invalid URL provided for shortening: {:?}", canonical);
            return canonical;
        }

        if canonical.starts_with(&self.short_url_prefix) {
            debug!("Already shortened: {}", canonical);
            return canonical;
        }

        match self.request_short_url(&canonical).await {
            Ok(short) => {
                info!("Successfully shortened URL: {}", short);
                short
            }
            Err(e) => {
                warn!("Error shortening URL, falling back to {}: {}", canonical, e);
                canonical
            }
        }
    }

    async fn request_short_url(&self, canonical: &str) -> Result<String, EngineError> {
        let request_url = format!("{}?url={}", self.endpoint, urlencoding::encode(canonical));

        let response = self
            .client
            .get(&request_url)
            .header(ACCEPT, "text/plain")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let body = body.trim();

        if status != StatusCode::OK || !body.starts_with(&self.short_url_prefix) {
            return Err(EngineError::Other(format!(
                "Invalid shortener response ({}): {:?}",
                status, body
            )));
        }

        Ok(body.to_string())
    }
}
