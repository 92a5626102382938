// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 路由注册表
//!
//! 处理器在这里显式登记，由元数据推导出挂载路径和方法；
//! 同一 `(method, path)` 重复登记会在启动时直接失败。

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::presentation::errors::ApiError;
use crate::presentation::handlers::{
    capcut_handler::CapcutHandler, youtube_handler::YoutubeHandler,
    ytsearch_handler::YtSearchHandler,
};
use crate::presentation::state::AppState;

/// 挂载前缀
pub const API_PREFIX: &str = "/api";

/// 查询参数
pub type QueryParams = HashMap<String, String>;

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }

    fn filter(&self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// 路由元数据
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    /// 形如 `/youtube?query=&url=`，`?` 之后只用于文档展示
    pub path_template: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub version: &'static str,
}

impl RouteMeta {
    /// 实际挂载路径，例如 `/api/youtube`
    pub fn mount_path(&self) -> String {
        let base = self
            .path_template
            .split_once('?')
            .map(|(base, _)| base)
            .unwrap_or(self.path_template);
        format!("{}{}", API_PREFIX, base)
    }

    /// 目录中展示的路径，带上文档化的查询串
    pub fn documented_path(&self) -> String {
        match self.path_template.split_once('?') {
            Some((_, query)) => format!("{}?{}", self.mount_path(), query),
            None => self.mount_path(),
        }
    }
}

/// 路由处理器
#[async_trait]
pub trait RouteHandler: Send + Sync {
    fn meta(&self) -> RouteMeta;

    /// 处理请求；错误统一渲染为错误信封
    async fn handle(&self, state: AppState, params: QueryParams) -> Result<Json<Value>, ApiError>;
}

/// 注册错误
#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate route {method} {path} (registered by {existing}, again by {duplicate})")]
    DuplicateRoute {
        method: HttpMethod,
        path: String,
        existing: &'static str,
        duplicate: &'static str,
    },
}

/// 目录条目
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub desc: String,
    pub path: String,
    pub author: String,
    pub method: String,
}

/// 按分类分组的目录
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogCategory {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

struct RegisteredRoute {
    meta: RouteMeta,
    path: String,
    handler: Arc<dyn RouteHandler>,
}

/// 接口目录路径，由路由层直接挂载
pub const INFO_PATH: &str = "/api/info";

/// 路由注册表
pub struct RouteRegistry {
    routes: Vec<RegisteredRoute>,
    /// 已占用的 `(method, path)` 及其所属处理器名
    keys: HashMap<(HttpMethod, String), &'static str>,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    /// 创建注册表，`GET /api/info` 预先占用
    pub fn new() -> Self {
        let mut keys = HashMap::new();
        keys.insert((HttpMethod::Get, INFO_PATH.to_string()), "Info");
        Self {
            routes: Vec::new(),
            keys,
        }
    }

    /// 登记内置的全部处理器
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Arc::new(YoutubeHandler))?;
        registry.register(Arc::new(YtSearchHandler))?;
        registry.register(Arc::new(CapcutHandler))?;
        info!("Load Complete! Total Routes Loaded: {}", registry.len());
        Ok(registry)
    }

    /// 登记一个处理器
    ///
    /// # 错误
    ///
    /// 同一 `(method, path)` 已被登记时返回 `RegistryError::DuplicateRoute`
    pub fn register(&mut self, handler: Arc<dyn RouteHandler>) -> Result<(), RegistryError> {
        let meta = handler.meta();
        let path = meta.mount_path();
        let key = (meta.method, path.clone());

        if let Some(&existing) = self.keys.get(&key) {
            return Err(RegistryError::DuplicateRoute {
                method: meta.method,
                path,
                existing,
                duplicate: meta.name,
            });
        }

        info!("Loaded route: {} ({})", meta.name, meta.method);
        self.keys.insert(key, meta.name);
        self.routes.push(RegisteredRoute {
            meta,
            path,
            handler,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 按分类分组的目录，分类与条目都保持首次登记顺序
    pub fn catalog(&self) -> Vec<CatalogCategory> {
        let mut categories: Vec<CatalogCategory> = Vec::new();
        for route in &self.routes {
            let item = CatalogItem {
                name: route.meta.name.to_string(),
                desc: route.meta.description.to_string(),
                path: route.meta.documented_path(),
                author: route.meta.author.to_string(),
                method: route.meta.method.as_str().to_string(),
            };
            match categories
                .iter_mut()
                .find(|c| c.name == route.meta.category)
            {
                Some(category) => category.items.push(item),
                None => categories.push(CatalogCategory {
                    name: route.meta.category.to_string(),
                    items: vec![item],
                }),
            }
        }
        categories
    }

    /// 把所有处理器挂载到路由上
    pub fn mount(&self) -> Router<AppState> {
        self.routes.iter().fold(Router::new(), |router, route| {
            let handler = route.handler.clone();
            router.route(
                &route.path,
                on(
                    route.meta.method.filter(),
                    move |State(state): State<AppState>, Query(params): Query<QueryParams>| {
                        let handler = handler.clone();
                        async move { handler.handle(state, params).await }
                    },
                ),
            )
        })
    }
}
