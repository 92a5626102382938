// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use rynn_api::config::settings::Settings;
use rynn_api::domain::models::video::PlayerProbe;
use rynn_api::engines::traits::{BrowserSession, EngineError, SessionLauncher};
use rynn_api::presentation::routes;
use rynn_api::presentation::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const CREATOR: &str = "Created Using Rynn UI";

/// 读取 `tests/fixtures` 下的页面
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path, e))
}

/// 按脚本返回固定页面的会话启动器
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pub html: String,
    pub probe: PlayerProbe,
    /// 等待主容器时超时
    pub fail_wait: bool,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
}

impl FakeLauncher {
    pub fn serving(html: String) -> Self {
        Self {
            html,
            ..Default::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, EngineError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            launcher: self.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub struct FakeSession {
    launcher: FakeLauncher,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<(), EngineError> {
        self.launcher.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), EngineError> {
        if self.launcher.fail_wait {
            return Err(EngineError::PageLoadTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), EngineError> {
        Err(EngineError::ElementNotFound(selector.to_string()))
    }

    async fn scroll_extent(&self, _container: &str) -> Result<f64, EngineError> {
        Ok(1080.0)
    }

    async fn scroll_to_end(&self, _container: &str) -> Result<(), EngineError> {
        Ok(())
    }

    async fn probe_player(&self) -> Result<PlayerProbe, EngineError> {
        Ok(self.launcher.probe.clone())
    }

    async fn content(&self) -> Result<String, EngineError> {
        Ok(self.launcher.html.clone())
    }

    async fn close(self: Box<Self>) -> Result<(), EngineError> {
        self.launcher.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 测试用配置：外部服务都指向 `upstream`，下载目录在临时目录中
pub fn test_settings(upstream: &str, downloads: &TempDir) -> Settings {
    let mut settings = Settings::from_defaults().expect("default settings");
    settings.browser.scroll_delay_ms = 0;
    settings.youtube.base_url = upstream.to_string();
    settings.youtube.request_timeout_ms = 5_000;
    settings.shortener.endpoint = format!("{}/api-create.php", upstream);
    settings.shortener.timeout_ms = 2_000;
    settings.downloads.dir = downloads.path().to_string_lossy().into_owned();
    settings.downloads.mirror_endpoint = format!("{}/capcut-video-downloader/", upstream);
    settings.downloads.public_base_url = "http://localhost:4000".to_string();
    settings.downloads.timeout_ms = 5_000;
    settings
}

pub struct TestApp {
    pub server: TestServer,
    pub launcher: FakeLauncher,
    pub downloads: TempDir,
}

pub fn create_test_app(upstream: &str, launcher: FakeLauncher) -> TestApp {
    let downloads = TempDir::new().expect("temp dir");
    let settings = Arc::new(test_settings(upstream, &downloads));
    let state = AppState::new(settings, Arc::new(launcher.clone())).expect("app state");
    let app = routes::create_app(state).expect("routes");

    TestApp {
        server: TestServer::new(app).expect("test server"),
        launcher,
        downloads,
    }
}
