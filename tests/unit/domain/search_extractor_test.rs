// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::integration::helpers::fixture;
    use rynn_api::domain::services::search_extractor::SearchExtractor;
    use scraper::Html;

    const BASE: &str = "https://www.youtube.com";

    #[test]
    fn test_markup_skips_placeholders_and_keeps_order() {
        let page = Html::parse_document(&fixture("search_markup.html"));
        let results = SearchExtractor::new(BASE).extract_markup(&page);

        let ids: Vec<_> = results.iter().filter_map(|r| r.video_id.as_deref()).collect();
        assert_eq!(ids, ["VID0001", "VID0002", "VID0003", "VID0004", "VID0005"]);
        assert!(results.iter().all(|r| r.is_video()));
        assert!(results.iter().all(|r| r.url.starts_with(BASE)));
    }

    #[test]
    fn test_initial_data_walks_every_section() {
        let page = Html::parse_document(&fixture("search_initial_data.html"));
        let results = SearchExtractor::new(BASE).extract_initial_data(&page);

        let ids: Vec<_> = results.iter().filter_map(|r| r.video_id.as_deref()).collect();
        assert_eq!(ids, ["INIT001", "INIT002", "INIT003", "INIT004"]);
        assert_eq!(results[0].url, "https://www.youtube.com/watch?v=INIT001");
    }

    #[test]
    fn test_extract_results_attaches_download_paths() {
        let results = SearchExtractor::new(BASE).extract_results(&fixture("search_initial_data.html"));
        assert_eq!(results.len(), 4);
        for result in &results {
            let path = result.download_url.as_deref().unwrap();
            assert!(path.starts_with("/download/"));
            assert_eq!(path.len(), "/download/".len() + 10);
        }
    }

    #[test]
    fn test_empty_page_has_no_results() {
        assert!(SearchExtractor::new(BASE)
            .extract_results(&fixture("empty.html"))
            .is_empty());
    }
}
