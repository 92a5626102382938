// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 文本处理工具
//!
//! 页面文本的规范化与计数解析。

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex"));

/// 从标签文本解析计数
///
/// 拼接文本中所有 ASCII 数字段后按整数解析，例如 `"1,234,567 views"` → `1234567`。
/// 没有数字或数值溢出时返回 0。
pub fn count_from_label(label: &str) -> u64 {
    let digits: String = DIGIT_RUN.find_iter(label).map(|m| m.as_str()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(0)
}

/// 删除首次出现的子串，空子串不做任何处理
pub fn remove_first(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    haystack.replacen(needle, "", 1)
}
