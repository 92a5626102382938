// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::settings::BrowserSettings;
use crate::domain::models::video::PlayerProbe;
use crate::engines::traits::{BrowserSession, EngineError, SessionLauncher};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

// Every branch is guarded so a missing player never throws inside the page.
const PLAYER_PROBE_SCRIPT: &str = r#"
(() => {
  const probe = { videoSrc: null, streamMap: null, playerVideoId: null, location: null };
  try {
    const video = document.querySelector('video');
    if (video && video.src) { probe.videoSrc = video.src; }
  } catch (e) {}
  try {
    const args = window.ytplayer && window.ytplayer.config && window.ytplayer.config.args;
    if (args && args.url_encoded_fmt_stream_map) { probe.streamMap = args.url_encoded_fmt_stream_map; }
  } catch (e) {}
  try {
    const player = document.getElementById('movie_player');
    const data = player && typeof player.getVideoData === 'function' ? player.getVideoData() : null;
    if (data && data.video_id) { probe.playerVideoId = data.video_id; }
  } catch (e) {}
  try { probe.location = window.location.href; } catch (e) {}
  return JSON.stringify(probe);
})()
"#;

fn browser_err(e: impl std::fmt::Display) -> EngineError {
    EngineError::Browser(e.to_string())
}

fn quoted(selector: &str) -> String {
    serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string())
}

/// Chromium 会话启动器
///
/// 默认每个请求启动一个无头 Chromium；配置了远程调试地址时改为连接远程实例，
/// 此时关闭会话只关闭页面，不关闭远程浏览器。
pub struct ChromiumLauncher {
    settings: BrowserSettings,
}

impl ChromiumLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, EngineError> {
        let remote = self.settings.remote_debugging_url.clone().or_else(|| {
            std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok()
        });

        let (browser, mut handler) = if let Some(ref url) = remote {
            info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url.as_str())
                .await
                .map_err(|e| EngineError::Browser(format!("Failed to connect to remote Chrome: {}", e)))?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(self.settings.navigation_timeout())
                .arg("--disable-setuid-sandbox")
                .arg("--disable-dev-shm-usage")
                .arg("--disable-accelerated-2d-canvas")
                .arg("--disable-gpu")
                .build()
                .map_err(EngineError::Browser)?;

            Browser::launch(config).await.map_err(browser_err)?
        };

        // Drive browser events until the connection goes away
        let events = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                events.abort();
                return Err(browser_err(e));
            }
        };

        if let Err(e) = page.set_user_agent(self.settings.user_agent.as_str()).await {
            warn!("Failed to set user agent: {}", e);
        }

        debug!("Browser session opened");

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            events,
            owns_browser: remote.is_none(),
            navigation_timeout: self.settings.navigation_timeout(),
        }))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 单个请求的 Chromium 会话
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    events: JoinHandle<()>,
    owns_browser: bool,
    navigation_timeout: Duration,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), EngineError> {
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| EngineError::Timeout { stage: "navigation" })?
            .map_err(browser_err)?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), EngineError> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(EngineError::PageLoadTimeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn click(&self, selector: &str) -> Result<(), EngineError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| EngineError::ElementNotFound(format!("{}: {}", selector, e)))?
            .click()
            .await
            .map_err(browser_err)?;
        Ok(())
    }

    async fn scroll_extent(&self, container: &str) -> Result<f64, EngineError> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.scrollHeight : 0; }})()",
            quoted(container)
        );
        self.page
            .evaluate(script)
            .await
            .map_err(browser_err)?
            .into_value::<f64>()
            .map_err(browser_err)
    }

    async fn scroll_to_end(&self, container: &str) -> Result<(), EngineError> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); if (el) {{ window.scrollTo(0, el.scrollHeight); }} return true; }})()",
            quoted(container)
        );
        self.page.evaluate(script).await.map_err(browser_err)?;
        Ok(())
    }

    async fn probe_player(&self) -> Result<PlayerProbe, EngineError> {
        let raw = self
            .page
            .evaluate(PLAYER_PROBE_SCRIPT)
            .await
            .map_err(browser_err)?
            .into_value::<String>()
            .map_err(browser_err)?;
        serde_json::from_str(&raw).map_err(|e| EngineError::Other(format!("Bad player probe: {}", e)))
    }

    async fn content(&self) -> Result<String, EngineError> {
        self.page.content().await.map_err(browser_err)
    }

    async fn close(self: Box<Self>) -> Result<(), EngineError> {
        let ChromiumSession {
            mut browser,
            page,
            events,
            owns_browser,
            ..
        } = *self;

        let page_result = page.close().await.map_err(browser_err);

        let browser_result = if owns_browser {
            let closed = browser.close().await.map(|_| ()).map_err(browser_err);
            if let Err(e) = browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
            closed
        } else {
            Ok(())
        };
        events.abort();
        debug!("Browser session closed");

        page_result.and(browser_result)
    }
}
