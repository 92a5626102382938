// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 详情页抓取结果（video）与列表页搜索结果（search_result）。
/// 所有模型都只在单次请求内存在，不做持久化。
pub mod search_result;
pub mod video;
