// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;
use scraper::Html;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use url::Url;

use crate::config::settings::DownloadSettings;
use crate::domain::page::PageQuery;

/// 镜像下载错误
#[derive(Error, Debug)]
pub enum DownloadError {
    /// 镜像页面中没有媒体链接
    #[error("Download link not found")]
    LinkNotFound,
    /// 上游请求失败
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// 写入本地文件失败
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// 镜像站媒体链接的匹配规则
///
/// 只接受与镜像接口同源的 `.mp4` 链接，例如
/// `https://vidburner.com/capcut-video-downloader/` 对应 `href="https://vidburner.com/....mp4"`
pub fn media_link_pattern(mirror_endpoint: &str) -> Result<Regex, regex::Error> {
    let origin = Url::parse(mirror_endpoint)
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|_| mirror_endpoint.trim_end_matches('/').to_string());
    Regex::new(&format!(
        r#"href=["']({}/[^\s"']+\.mp4)["']"#,
        regex::escape(&origin)
    ))
}

/// 从镜像页面的脚本中查找媒体链接
///
/// 每段脚本取第一个匹配，多段脚本都匹配时以最后一段为准
pub fn find_media_link(html: &str, pattern: &Regex) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .all("script")
        .iter()
        .filter_map(|script| {
            let body: String = script.text().collect();
            pattern
                .captures(&body)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .last()
}

/// 在 `dir` 中独占创建 `<stem>.mp4`
///
/// 文件已存在时依次尝试 `<stem>-1.mp4`、`<stem>-2.mp4`，从不覆盖已有文件
pub async fn create_unique(dir: &Path, stem: &str) -> std::io::Result<(fs::File, String)> {
    let mut attempt = 0u32;
    loop {
        let file_name = if attempt == 0 {
            format!("{}.mp4", stem)
        } else {
            format!("{}-{}.mp4", stem, attempt)
        };
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&file_name))
            .await
        {
            Ok(file) => return Ok((file, file_name)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

/// 镜像站下载器
///
/// 通过镜像站解析模板地址，再把媒体文件保存到本地下载目录
pub struct MirrorDownloader {
    client: reqwest::Client,
    settings: DownloadSettings,
    link_pattern: Regex,
}

impl MirrorDownloader {
    pub fn new(client: reqwest::Client, settings: DownloadSettings) -> Result<Self, regex::Error> {
        let link_pattern = media_link_pattern(&settings.mirror_endpoint)?;
        Ok(Self {
            client,
            settings,
            link_pattern,
        })
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.settings.timeout_ms)
    }

    /// 解析模板地址对应的媒体直链
    pub async fn resolve(&self, source_url: &str) -> Result<String, DownloadError> {
        let request_url = format!(
            "{}?url={}",
            self.settings.mirror_endpoint,
            urlencoding::encode(source_url)
        );
        info!("Fetching mirror page for {}", source_url);

        let html = self
            .client
            .get(&request_url)
            .timeout(self.timeout())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let link = find_media_link(&html, &self.link_pattern).ok_or(DownloadError::LinkNotFound)?;
        info!("Download link found: {}", link);
        Ok(link)
    }

    /// 下载媒体文件并返回对外地址
    ///
    /// 文件名为当前 Unix 毫秒时间戳，同一毫秒内的并发下载追加 `-N` 后缀；
    /// 目录不存在时自动创建
    pub async fn download(&self, media_url: &str) -> Result<String, DownloadError> {
        let mut response = self
            .client
            .get(media_url)
            .timeout(self.timeout())
            .send()
            .await?
            .error_for_status()?;

        let dir = Path::new(&self.settings.dir);
        fs::create_dir_all(dir).await?;

        let stem = chrono::Utc::now().timestamp_millis().to_string();
        let (mut file, file_name) = create_unique(dir, &stem).await?;
        let file_path = dir.join(&file_name);

        let written = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<(), DownloadError>(())
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&file_path).await {
                warn!("Could not remove partial download {:?}: {}", file_path, cleanup);
            }
            return Err(e);
        }

        info!("Saved {} to {:?}", media_url, file_path);
        Ok(self.public_url(&file_name))
    }

    /// 下载文件对外暴露的地址
    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/downloads/{}",
            self.settings.public_base_url.trim_end_matches('/'),
            file_name
        )
    }
}
