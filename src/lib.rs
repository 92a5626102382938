// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含页面抽取的核心模型和服务
pub mod domain;

/// 引擎模块
///
/// 浏览器会话抽象及其 Chromium 实现
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如短链服务、镜像下载等
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由注册、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
