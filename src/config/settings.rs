// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 启动时加载一次，之后以 `Arc<Settings>` 只读共享
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 响应信封配置
    pub api: ApiSettings,
    /// 浏览器自动化配置
    pub browser: BrowserSettings,
    /// 视频平台配置
    pub youtube: YoutubeSettings,
    /// 短链服务配置
    pub shortener: ShortenerSettings,
    /// 下载配置
    pub downloads: DownloadSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 响应信封配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// 写入每个 JSON 响应的 `creator` 字段
    pub creator: String,
}

/// 浏览器自动化配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 远程 Chrome 调试地址；为空时每个请求启动本地浏览器
    pub remote_debugging_url: Option<String>,
    /// 页面导航超时时间（毫秒）
    pub navigation_timeout_ms: u64,
    /// 等待元素出现的超时时间（毫秒）
    pub selector_timeout_ms: u64,
    /// 两次滚动之间的等待时间（毫秒）
    pub scroll_delay_ms: u64,
    /// 最大滚动次数
    pub scroll_max_attempts: u32,
    /// 浏览器 User-Agent
    pub user_agent: String,
}

/// 视频平台配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeSettings {
    /// 站点根地址，用于搜索页和相对链接
    pub base_url: String,
    /// 直接抓取搜索页时的请求超时（毫秒）
    pub request_timeout_ms: u64,
    /// 直接抓取时使用的 User-Agent
    pub user_agent: String,
}

/// 短链服务配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenerSettings {
    /// 短链创建接口
    pub endpoint: String,
    /// 合法短链的前缀
    pub short_url_prefix: String,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
}

/// 下载配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSettings {
    /// 本地保存目录
    pub dir: String,
    /// 对外暴露下载文件的根地址
    pub public_base_url: String,
    /// CapCut 镜像站解析接口
    pub mirror_endpoint: String,
    /// 下载超时（毫秒）
    pub timeout_ms: u64,
}

impl BrowserSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/<APP_ENVIRONMENT>`、
    /// 以 `RYNN__` 为前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RYNN").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 仅使用内置默认值构建配置
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("api.creator", "Created Using Rynn UI")?
            // Browser automation
            .set_default("browser.navigation_timeout_ms", 60_000)?
            .set_default("browser.selector_timeout_ms", 30_000)?
            .set_default("browser.scroll_delay_ms", 2_000)?
            .set_default("browser.scroll_max_attempts", 5)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36",
            )?
            .set_default("youtube.base_url", "https://www.youtube.com")?
            .set_default("youtube.request_timeout_ms", 30_000)?
            .set_default(
                "youtube.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            )?
            .set_default("shortener.endpoint", "https://tinyurl.com/api-create.php")?
            .set_default("shortener.short_url_prefix", "https://tinyurl.com/")?
            .set_default("shortener.timeout_ms", 10_000)?
            .set_default("downloads.dir", "downloads")?
            .set_default("downloads.public_base_url", "http://localhost:4000")?
            .set_default(
                "downloads.mirror_endpoint",
                "https://vidburner.com/capcut-video-downloader/",
            )?
            .set_default("downloads.timeout_ms", 120_000)
    }
}
