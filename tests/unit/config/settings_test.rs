// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试配置加载：内置默认值与 `config/default.toml` 应保持一致

#[cfg(test)]
mod tests {
    use rynn_api::config::settings::Settings;

    #[test]
    fn test_config_loading_from_default_toml() {
        let settings = Settings::new().expect("configuration should load");
        let defaults = Settings::from_defaults().expect("built-in defaults");

        assert_eq!(settings.server.port, defaults.server.port);
        assert_eq!(settings.api.creator, "Created Using Rynn UI");
        assert_eq!(settings.youtube.base_url, "https://www.youtube.com");
        assert_eq!(settings.shortener.short_url_prefix, "https://tinyurl.com/");
        assert_eq!(
            settings.downloads.mirror_endpoint,
            "https://vidburner.com/capcut-video-downloader/"
        );
        assert_eq!(settings.downloads.timeout_ms, defaults.downloads.timeout_ms);
    }

    #[test]
    fn test_default_timeouts() {
        let settings = Settings::from_defaults().unwrap();
        assert_eq!(settings.browser.navigation_timeout().as_secs(), 60);
        assert_eq!(settings.youtube.request_timeout_ms, 30_000);
        assert_eq!(settings.downloads.timeout_ms, 120_000);
        assert!(settings.browser.user_agent.contains("Chrome/96"));
        assert!(settings.youtube.user_agent.contains("Chrome/91"));
    }
}
