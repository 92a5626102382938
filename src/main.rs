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

use rynn_api::config::settings::Settings;
use rynn_api::engines::chromium_engine::ChromiumLauncher;
use rynn_api::engines::traits::SessionLauncher;
use rynn_api::presentation::routes;
use rynn_api::presentation::state::AppState;
use rynn_api::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting rynn-api...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Browser sessions are opened per request
    let launcher: Arc<dyn SessionLauncher> =
        Arc::new(ChromiumLauncher::new(settings.browser.clone()));
    info!("Session launcher: {}", launcher.name());

    // 4. Build routes
    let state = AppState::new(settings.clone(), launcher)?;
    let app = routes::create_app(state)?;

    // 5. Start HTTP server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server is running on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
