// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 页面查询能力
//!
//! 抽取引擎只依赖按选择器查询、读文本、读属性这几种能力，
//! 文档快照和元素作用域都实现了它，因此可以直接用 HTML 片段测试。

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("Invalid selector {:?}: {}", selector, e);
            None
        }
    }
}

/// 规范化元素文本：拼接所有文本节点后去除首尾空白
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 可按选择器查询的页面树
pub trait PageQuery {
    /// 第一个匹配的元素
    fn first(&self, selector: &str) -> Option<ElementRef<'_>>;

    /// 所有匹配的元素，按文档顺序
    fn all(&self, selector: &str) -> Vec<ElementRef<'_>>;

    fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    /// 第一个匹配元素的文本，未匹配时为 `None`
    fn select_text(&self, selector: &str) -> Option<String> {
        self.first(selector).map(|e| element_text(&e))
    }

    /// 第一个匹配元素的文本，未匹配时为空串
    fn text_or_empty(&self, selector: &str) -> String {
        self.select_text(selector).unwrap_or_default()
    }

    /// 第一个匹配元素的属性值
    fn select_attr(&self, selector: &str, name: &str) -> Option<String> {
        self.first(selector)
            .and_then(|e| e.value().attr(name).map(str::to_string))
    }
}

impl PageQuery for Html {
    fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = parse_selector(selector)?;
        self.select(&selector).next()
    }

    fn all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(selector) {
            Some(selector) => self.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

impl<'a> PageQuery for ElementRef<'a> {
    fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = parse_selector(selector)?;
        self.select(&selector).next()
    }

    fn all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(selector) {
            Some(selector) => self.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}
