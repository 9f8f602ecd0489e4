use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// A verified point of presence from the canonical registry.
///
/// Every `Pop` carries both a routing `code` and a `subnet`; entries
/// lacking either never make it past registry filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pop {
    /// Stable identifier assigned by the directory
    pub id: String,

    /// Human-readable PoP name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// City or metro the PoP serves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Country the PoP is in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Subnet used to steer client-subnet DNS queries toward this PoP
    pub subnet: IpNet,

    /// Short routing code, compared case-insensitively (e.g. "NRT")
    pub code: String,

    /// Codes of PoPs whose routing is an acceptable substitute, in
    /// declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<String>,
}

impl Pop {
    /// The routing code folded for comparison
    #[must_use]
    pub fn code_lower(&self) -> String {
        self.code.to_lowercase()
    }
}

/// An unverified entry from the full PoP listing.
///
/// This is what the directory API hands back: descriptive metadata for
/// every edge location, with `code`/`subnet`/`neighbors` only present when
/// someone has annotated the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedPop {
    /// Stable identifier assigned by the directory
    pub id: String,

    /// Human-readable PoP name
    pub name: String,

    /// City or metro the PoP serves
    #[serde(default)]
    pub location: String,

    /// Country the PoP is in
    #[serde(default)]
    pub country: String,

    /// Annotated subnet, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<IpNet>,

    /// Annotated routing code, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Annotated neighbor codes, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<String>,
}

impl From<Pop> for ListedPop {
    fn from(pop: Pop) -> Self {
        Self {
            id: pop.id,
            name: pop.name.unwrap_or_default(),
            location: pop.location.unwrap_or_default(),
            country: pop.country.unwrap_or_default(),
            subnet: Some(pop.subnet),
            code: Some(pop.code),
            neighbors: pop.neighbors,
        }
    }
}

impl ListedPop {
    /// Returns true if the entry carries everything verification needs
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.code.is_some() && self.subnet.is_some()
    }

    /// Returns true if the entry carries exactly one of code/subnet,
    /// which usually means a stale or half-finished annotation
    #[must_use]
    pub const fn is_partially_annotated(&self) -> bool {
        self.code.is_some() != self.subnet.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_parses_without_optional_fields() {
        let pop: Pop = serde_json::from_str(
            r#"{"id": "NRT57", "subnet": "1.2.3.0/24", "code": "NRT"}"#,
        )
        .unwrap();
        assert_eq!(pop.code, "NRT");
        assert_eq!(pop.subnet.to_string(), "1.2.3.0/24");
        assert!(pop.neighbors.is_empty());
        assert!(pop.name.is_none());
    }

    #[test]
    fn pop_keeps_neighbor_order() {
        let pop: Pop = serde_json::from_str(
            r#"{"id": "NRT57", "subnet": "1.2.3.0/24", "code": "NRT",
                "neighbors": ["KIX", "HND"]}"#,
        )
        .unwrap();
        assert_eq!(pop.neighbors, vec!["KIX", "HND"]);
    }

    #[test]
    fn listed_pop_verification_predicates() {
        let full: ListedPop = serde_json::from_str(
            r#"{"id": "a", "name": "Tokyo", "subnet": "1.2.3.0/24", "code": "NRT"}"#,
        )
        .unwrap();
        assert!(full.is_verified());
        assert!(!full.is_partially_annotated());

        let half: ListedPop =
            serde_json::from_str(r#"{"id": "b", "name": "Osaka", "code": "KIX"}"#).unwrap();
        assert!(!half.is_verified());
        assert!(half.is_partially_annotated());

        let bare: ListedPop =
            serde_json::from_str(r#"{"id": "c", "name": "Sydney"}"#).unwrap();
        assert!(!bare.is_verified());
        assert!(!bare.is_partially_annotated());
    }
}
