// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::engines::traits::EngineError;
use crate::infrastructure::mirror::DownloadError;

/// 应用错误类型
///
/// 统一渲染为 `{status: false, error, message?}`，不输出调用栈
#[derive(Error, Debug)]
pub enum ApiError {
    /// 缺少或非法的请求参数
    #[error("{0}")]
    InvalidInput(String),

    /// 上游某个阶段超时
    #[error("Timeout during {stage}: {message}")]
    UpstreamTimeout { stage: &'static str, message: String },

    /// 两条抽取路径都没有结果
    #[error("{0}")]
    ExtractionEmpty(String),

    /// 上游不可用且没有本地兜底
    #[error("{error}")]
    UpstreamUnavailable {
        error: String,
        message: Option<String>,
    },

    /// 其他错误
    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ExtractionEmpty(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamTimeout { .. }
            | ApiError::UpstreamUnavailable { .. }
            | ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体中的 `error` 与 `message`
    fn parts(&self) -> (String, Option<String>) {
        match self {
            ApiError::InvalidInput(msg) | ApiError::ExtractionEmpty(msg) => (msg.clone(), None),
            ApiError::UpstreamTimeout { stage, message } => {
                (format!("Timeout during {}", stage), Some(message.clone()))
            }
            ApiError::UpstreamUnavailable { error, message } => (error.clone(), message.clone()),
            ApiError::Unknown(msg) => ("Failed to process request".to_string(), Some(msg.clone())),
        }
    }

    /// 附带上下文的上游错误
    pub fn upstream(error: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ApiError::UpstreamUnavailable {
            error: error.into(),
            message: Some(cause.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::UpstreamTimeout { stage, message } => {
                error!(stage = *stage, "Upstream timeout: {}", message)
            }
            e if status.is_server_error() => error!("Request failed: {}", e),
            e => warn!("Request rejected ({}): {}", status.as_u16(), e),
        }

        let (error, message) = self.parts();
        let mut body = Map::new();
        body.insert("status".to_string(), json!(false));
        body.insert("error".to_string(), json!(error));
        if let Some(message) = message {
            body.insert("message".to_string(), json!(message));
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if let Some(stage) = err.stage() {
            return ApiError::UpstreamTimeout {
                stage,
                message: err.to_string(),
            };
        }

        match err {
            EngineError::RequestFailed(_) | EngineError::Browser(_) => {
                ApiError::upstream("Upstream service unavailable", err)
            }
            _ => ApiError::Unknown(err.to_string()),
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::LinkNotFound => ApiError::UpstreamUnavailable {
                error: err.to_string(),
                message: None,
            },
            DownloadError::Request(ref e) if e.is_timeout() => ApiError::UpstreamTimeout {
                stage: "download",
                message: err.to_string(),
            },
            DownloadError::Request(_) | DownloadError::Io(_) => {
                ApiError::upstream("Failed to download video", err)
            }
        }
    }
}
