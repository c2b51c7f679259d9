//! Useful resources: downloadable cards from a local JSON list

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_URL: &str = "scripts/data/resources.json";

pub const LOADING: &str = "Loading resources…";
pub const EMPTY: &str = "No resources found.";
pub const FAILED: &str = "Could not load resources.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link: String,
}

impl Resource {
    pub fn download_label(&self) -> String {
        format!("Download {}", self.title)
    }
}

/// A non-array payload counts as an empty list. Missing fields render empty.
pub fn parse_resources(value: Value) -> serde_json::Result<Vec<Resource>> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_optional() {
        let list = parse_resources(json!([
            {"title": "Guide", "description": "d", "link": "files/guide.pdf"},
            {"title": "Deck", "description": "d", "tags": ["ai"], "link": "files/deck.pdf"}
        ]))
        .unwrap();
        assert!(list[0].tags.is_empty());
        assert_eq!(list[1].tags, ["ai"]);
        assert_eq!(list[1].download_label(), "Download Deck");
    }

    #[test]
    fn incomplete_entries_still_render() {
        let list = parse_resources(json!([
            {"description": "no title"},
            {"title": "No link"},
            {"title": "Full", "link": "files/full.pdf"}
        ]))
        .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].title, "");
        assert_eq!(list[0].description, "no title");
        assert_eq!(list[1].link, "");
        assert_eq!(list[1].download_label(), "Download No link");
        assert_eq!(list[2].link, "files/full.pdf");
    }

    #[test]
    fn object_payload_is_empty() {
        assert!(parse_resources(json!({"items": []})).unwrap().is_empty());
    }
}
