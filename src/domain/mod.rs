// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 包含抓取系统的核心逻辑：
/// - 领域模型（models）：视频详情、搜索结果等数据结构
/// - 页面查询（page）：按选择器读取页面的抽象能力
/// - 服务（services）：布局判断、字段抽取和抓取流程
///
/// 领域层不依赖 HTTP 层，抽取逻辑可以直接用 HTML 片段测试。
pub mod models;
pub mod page;
pub mod services;
