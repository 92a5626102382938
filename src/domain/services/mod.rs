// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 搜索结果抽取（search_extractor）
/// - 详情字段抽取（video_extractor）
/// - 浏览器抓取流程（video_scraper）
pub mod search_extractor;
pub mod video_extractor;
pub mod video_scraper;
