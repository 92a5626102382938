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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::video::PlayerProbe;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 浏览器操作失败
    #[error("Browser error: {0}")]
    Browser(String),
    /// 元素在限定时间内未出现
    #[error("Page load timeout: {selector} did not appear within {timeout_ms} ms")]
    PageLoadTimeout { selector: String, timeout_ms: u64 },
    /// 某个阶段超时
    #[error("Timeout during {stage}")]
    Timeout { stage: &'static str },
    /// 元素不存在
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 错误所在阶段，仅超时类错误有值
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            EngineError::PageLoadTimeout { .. } => Some("selector wait"),
            EngineError::Timeout { stage } => Some(stage),
            EngineError::RequestFailed(e) if e.is_timeout() => Some("upstream request"),
            _ => None,
        }
    }
}

/// 浏览器会话
///
/// 每个请求独占一个会话。抽取引擎只通过这些能力驱动页面，
/// 测试中可以用脚本化的实现替代真实浏览器。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到地址并等待加载
    async fn navigate(&self, url: &str) -> Result<(), EngineError>;

    /// 等待选择器对应元素出现，超时返回 `PageLoadTimeout`
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), EngineError>;

    /// 点击元素
    async fn click(&self, selector: &str) -> Result<(), EngineError>;

    /// 读取容器当前的滚动高度
    async fn scroll_extent(&self, container: &str) -> Result<f64, EngineError>;

    /// 滚动到容器当前的最大高度
    async fn scroll_to_end(&self, container: &str) -> Result<(), EngineError>;

    /// 读取播放器相关信息
    async fn probe_player(&self) -> Result<PlayerProbe, EngineError>;

    /// 当前 DOM 的 HTML 快照
    async fn content(&self) -> Result<String, EngineError>;

    /// 释放会话
    async fn close(self: Box<Self>) -> Result<(), EngineError>;
}

/// 会话启动器
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// 打开一个新的浏览器会话
    async fn open(&self) -> Result<Box<dyn BrowserSession>, EngineError>;

    /// 启动器名称
    fn name(&self) -> &'static str;
}
