// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::Rng;
use url::Url;

/// 视频平台的短链主机
pub const SHORT_HOST: &str = "youtu.be";

/// 视频平台主机（匹配 `www.youtube.com`、`m.youtube.com` 等）
pub const PLATFORM_HOST: &str = "youtube.com";

const SHORT_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const SHORT_ID_LEN: usize = 10;

/// 将相对路径拼接为平台绝对地址
///
/// 空路径返回 `None`，不生成只有主机的地址。
pub fn absolutize(base: &str, href: Option<&str>) -> Option<String> {
    let href = href?.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// 平台规范短链 `https://youtu.be/<id>`
pub fn canonical_short_url(video_id: &str) -> String {
    format!("https://{}/{}", SHORT_HOST, video_id)
}

/// 视频 ID 只由 `[A-Za-z0-9_-]` 组成
pub fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// 从平台观看地址中提取 `v` 参数
///
/// 只接受主机属于平台、且 `v` 参数是合法视频 ID 的地址。
pub fn platform_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    if !host.contains(PLATFORM_HOST) {
        return None;
    }
    url.query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
        .filter(|v| is_video_id(v))
}

/// 判断是否为平台的单视频观看地址（`/watch?v=...`）
pub fn is_watch_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.path() == "/watch" && platform_video_id(raw).is_some(),
        Err(_) => false,
    }
}

/// 提取 `href` 中 `v=` 后的视频 ID（到下一个 `&` 为止）
pub fn video_id_from_href(href: &str) -> Option<String> {
    let start = href.find("v=")? + 2;
    let id: String = href[start..].chars().take_while(|c| *c != '&').collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// 生成内部下载短路径，例如 `/download/aB3_x-9QzK`
pub fn internal_short_path(prefix: &str) -> String {
    let mut rng = rand::rng();
    let id: String = (0..SHORT_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SHORT_ID_CHARSET.len());
            SHORT_ID_CHARSET[idx] as char
        })
        .collect();
    format!("/{}/{}", prefix, id)
}
