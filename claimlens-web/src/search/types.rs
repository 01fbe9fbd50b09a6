use serde::Deserialize;

/// Response envelope of the Google Custom Search API. Only the fields the
/// gateway consumes are modeled; everything else is ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct CseResponse {
    #[serde(default)]
    pub items: Option<Vec<CseItem>>,

    #[serde(default, rename = "searchInformation")]
    pub search_information: Option<CseSearchInformation>,
}

impl CseResponse {
    /// Links of this page, in ranking order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .flatten()
            .filter_map(|item| item.link.as_deref())
    }

    /// Ranked hits of this page. Ephemeral: the gateway keeps the URLs and
    /// discards the rest after filtering.
    pub fn hits(&self) -> Vec<SearchHit> {
        self.links()
            .enumerate()
            .map(|(idx, link)| SearchHit {
                rank: (idx + 1) as u32,
                url: link.to_string(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.as_ref().map(|i| i.is_empty()).unwrap_or(true)
    }
}

/// A URL and its ranking position within one result page.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub rank: u32,
    pub url: String,
}

/// One search hit. The URL is all the pipeline keeps; title and snippet are
/// decoded for logging only.
#[derive(Debug, Clone, Deserialize)]
pub struct CseItem {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CseSearchInformation {
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_are_ranked_in_page_order() {
        let resp: CseResponse = serde_json::from_str(
            r#"{"items":[{"link":"https://a.example/1"},{"title":"linkless"},{"link":"https://b.example/2"}]}"#,
        )
        .unwrap();

        let hits = resp.hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[0].url, "https://a.example/1");
        assert_eq!(hits[1].rank, 2);
        assert!(!resp.is_empty());
    }

    #[test]
    fn missing_items_decode_as_empty_page() {
        let resp: CseResponse = serde_json::from_str(r#"{"searchInformation":{"totalResults":"0"}}"#).unwrap();
        assert!(resp.is_empty());
        assert!(resp.hits().is_empty());
    }
}
