// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面抽取单元测试
///
/// 直接对 `tests/fixtures` 中的静态页面运行抽取逻辑，不启动浏览器
pub mod search_extractor_test;
pub mod video_extractor_test;
