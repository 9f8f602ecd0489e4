use serde::{Deserialize, Serialize};

/// Response envelope from the directory search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySearchResponse {
    /// Result metadata
    pub metadata: DirectoryMetadata,

    /// Matched directory entries
    #[serde(default)]
    pub items: Vec<DirectoryHit>,
}

/// Search result metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryMetadata {
    /// Total number of entries matching the search
    pub count: u64,
}

/// A single search hit: the entry plus its tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryHit {
    /// Tags attached to the entry
    #[serde(default)]
    pub tags: Vec<DirectoryTag>,

    /// The entry itself
    pub item: DirectoryItem,
}

impl DirectoryHit {
    /// Returns true if any tag carries the given name
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

/// A directory tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryTag {
    /// Tag name
    pub name: String,
}

/// A directory entry describing one map pin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryItem {
    /// Directory-scoped identifier (e.g. "cf-map-pins#NRT57")
    pub id: String,

    /// Entry name
    pub name: String,

    /// Pin-specific fields
    #[serde(rename = "additionalFields")]
    pub additional_fields: PinFields,
}

/// Map-pin detail fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinFields {
    /// City or metro shown on the pin
    #[serde(rename = "pinName", default)]
    pub pin_name: String,

    /// Country shown under the pin
    #[serde(rename = "pinDescription", default)]
    pub pin_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_payload() {
        let body = r#"{
            "metadata": {"count": 2},
            "items": [
                {
                    "tags": [{"name": "Edge Locations"}],
                    "item": {
                        "id": "cf-map-pins#NRT57",
                        "name": "Tokyo PoP",
                        "additionalFields": {
                            "pinName": "Tokyo",
                            "pinDescription": "Japan"
                        }
                    }
                },
                {
                    "tags": [{"name": "Regional Caches"}],
                    "item": {
                        "id": "cf-map-pins#NRT-RC",
                        "name": "Tokyo Cache",
                        "additionalFields": {}
                    }
                }
            ]
        }"#;

        let response: DirectorySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.metadata.count, 2);
        assert_eq!(response.items.len(), 2);
        assert!(response.items[0].has_tag("Edge Locations"));
        assert!(!response.items[1].has_tag("Edge Locations"));
        assert_eq!(response.items[0].item.additional_fields.pin_name, "Tokyo");
    }
}
