// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部服务交互：
/// - 短链服务（shortener）：地址规范化与外部短链
/// - 镜像下载（mirror）：通过镜像站解析并保存媒体文件
/// - 搜索页客户端（youtube_client）：直接抓取服务端渲染的搜索页
pub mod mirror;
pub mod shortener;
pub mod youtube_client;
