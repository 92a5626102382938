// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::integration::helpers::fixture;
    use rynn_api::domain::models::video::{PageDesign, VideoRecord};
    use rynn_api::domain::services::video_extractor::{resolve_design, VideoExtractor};
    use scraper::Html;

    const BASE: &str = "https://www.youtube.com";

    fn load(name: &str) -> Html {
        Html::parse_document(&fixture(name))
    }

    #[test]
    fn test_design_resolution() {
        assert_eq!(resolve_design(&load("design_a.html")), PageDesign::DesignA);
        assert_eq!(resolve_design(&load("design_b.html")), PageDesign::DesignB);
        // Nothing to anchor on falls back to the older layout
        assert_eq!(resolve_design(&load("empty.html")), PageDesign::DesignB);
    }

    #[test]
    fn test_design_a_fields() {
        let page = load("design_a.html");
        let record = VideoExtractor::new(BASE).extract(&page, PageDesign::DesignA);

        assert_eq!(record.title, "Learning Rust in One Hour");
        assert_eq!(record.view_count, 1_024_000);
        assert_eq!(record.upload_date, "Mar 3, 2024");
        assert_eq!(record.channel.profile_url.as_deref(), Some("https://www.youtube.com/@rustacean"));
        assert!(record.description.contains("Ownership, borrowing and lifetimes explained."));
        assert!(!record.description.contains("1,024,000 views"));

        let related = &record.related_items[0];
        assert_eq!(related.channel_name, "Tokio Talks");
        assert_eq!(related.view_count_text, "50K views");
        assert!(related.url.starts_with(BASE));
    }

    #[test]
    fn test_design_b_fields() {
        let page = load("design_b.html");
        let record = VideoExtractor::new(BASE).extract(&page, PageDesign::DesignB);

        assert_eq!(record.title, "Perfect Pancakes");
        assert_eq!(record.description, "Flour, eggs, milk.");
        assert_eq!(record.upload_date, "Jan 5, 2021");
        assert_eq!(record.view_count, 987);
        assert_eq!(record.like_count, 55);
        assert_eq!(record.channel.name, "Chef Ana");
        assert_eq!(
            record.channel.profile_url.as_deref(),
            Some("https://www.youtube.com/channel/UC123")
        );
        assert_eq!(
            record.channel.thumbnail_url.as_deref(),
            Some("https://yt3.ggpht.com/chef.jpg")
        );
        assert_eq!(record.hashtags, ["#cooking"]);
        assert!(record.related_items.is_empty());
        assert!(record.comments.is_empty());
    }

    #[test]
    fn test_empty_page_yields_defaults() {
        let page = load("empty.html");
        let extractor = VideoExtractor::new(BASE);
        assert_eq!(extractor.extract(&page, PageDesign::DesignA), VideoRecord::default());
        assert_eq!(extractor.extract(&page, PageDesign::DesignB), VideoRecord::default());
    }
}
