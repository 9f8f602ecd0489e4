use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Classification of one PoP's observed routing outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// The observed identifier starts with the PoP's own expected prefix
    Ok,

    /// The observed identifier matches one of the PoP's declared neighbors
    Neighbor {
        /// Raw observed identifier
        observed: String,
        /// The first declared neighbor whose prefix matched
        matched: String,
    },

    /// A real identifier was observed, but it matches neither the PoP nor
    /// any neighbor
    Mismatch {
        /// Raw observed identifier (may be empty when the probe returned
        /// nothing usable)
        observed: String,
    },

    /// No identifier could be observed at all — the forward query yielded
    /// no address
    Unresolved,
}

impl Verdict {
    /// Returns true for outcomes that count as verified (own or neighbor)
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Ok | Self::Neighbor { .. })
    }
}

/// One PoP's verification outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopReport {
    /// Registry identifier of the PoP
    pub id: String,

    /// Routing code of the PoP, as declared in the registry
    pub code: String,

    /// Classification of the observed outcome
    pub verdict: Verdict,

    /// Address the forward query resolved to (subnet strategy only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_covers_ok_and_neighbor() {
        assert!(Verdict::Ok.is_pass());
        assert!(Verdict::Neighbor {
            observed: "KIX50-C2".into(),
            matched: "KIX".into(),
        }
        .is_pass());
        assert!(!Verdict::Mismatch {
            observed: "CDG40-P3".into()
        }
        .is_pass());
        assert!(!Verdict::Unresolved.is_pass());
    }

    #[test]
    fn verdict_serializes_tagged() {
        let json = serde_json::to_value(Verdict::Ok).unwrap();
        assert_eq!(json["status"], "ok");

        let json = serde_json::to_value(Verdict::Neighbor {
            observed: "KIX50-C2".into(),
            matched: "KIX".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "neighbor");
        assert_eq!(json["matched"], "KIX");
    }
}
