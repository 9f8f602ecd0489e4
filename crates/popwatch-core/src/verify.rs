//! The verdict engine.
//!
//! Both probe strategies reduce to the same question: does the observed
//! routing identifier start with the prefix we expect for this PoP, for
//! one of its declared neighbors, or for nobody? The only thing that
//! differs between strategies is how a code is turned into a prefix, which
//! is what [`ExpectedPrefix`] captures.
//!
//! Matching is prefix-based rather than exact because real CDN naming
//! schemes embed the routing code as a leading segment of a longer
//! structured name; trailing shard or cluster ids are irrelevant.

use crate::types::{Pop, Verdict};
use std::net::IpAddr;

/// How to derive the expected leading segment for a routing code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedPrefix {
    /// The identifier is expected to start with the code itself
    /// (header strategy: `NRT52-P1` starts with `nrt`)
    Code,

    /// The identifier is a reverse-DNS name expected to start with an
    /// IP-derived segment followed by the code
    /// (subnet strategy: `server-9-9-9-9.sin1.example.net` starts with
    /// `server-9-9-9-9.sin`)
    ReverseDns {
        /// The address the forward query resolved to
        ip: IpAddr,
    },
}

impl ExpectedPrefix {
    /// Build the full expected prefix for a routing code
    #[must_use]
    pub fn for_code(&self, code: &str) -> String {
        match self {
            Self::Code => code.to_lowercase(),
            Self::ReverseDns { ip } => {
                format!("server-{}.{}", dashed(*ip), code.to_lowercase())
            }
        }
    }
}

/// Render an address with its separators replaced by dashes, the way
/// reverse-DNS server names embed it
fn dashed(ip: IpAddr) -> String {
    ip.to_string().replace(['.', ':'], "-")
}

/// What a probe observed for one PoP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// A routing identifier was observed. An empty string means the probe
    /// got an answer with nothing usable in it (missing header, empty
    /// reverse lookup) and classifies as a mismatch.
    Identifier {
        /// The raw observed value
        observed: String,
        /// How to build expected prefixes for this strategy
        expected: ExpectedPrefix,
    },

    /// The forward query produced no usable address, so there is nothing
    /// to compare
    NoAddress,
}

/// Classify one PoP's observation.
///
/// Pure function: same `(pop, observation)` in, same verdict out. Matching
/// is case-insensitive on both sides. Neighbor declaration order is the
/// tie-break; the first neighbor whose prefix matches is reported.
#[must_use]
pub fn classify(pop: &Pop, observation: &Observation) -> Verdict {
    match observation {
        Observation::NoAddress => Verdict::Unresolved,
        Observation::Identifier { observed, expected } => {
            let folded = observed.to_lowercase();

            if folded.starts_with(&expected.for_code(&pop.code)) {
                return Verdict::Ok;
            }

            for neighbor in &pop.neighbors {
                if folded.starts_with(&expected.for_code(neighbor)) {
                    return Verdict::Neighbor {
                        observed: observed.clone(),
                        matched: neighbor.clone(),
                    };
                }
            }

            Verdict::Mismatch {
                observed: observed.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pop(code: &str, neighbors: &[&str]) -> Pop {
        Pop {
            id: format!("{code}-test"),
            name: None,
            location: None,
            country: None,
            subnet: "1.2.3.0/24".parse().unwrap(),
            code: code.to_string(),
            neighbors: neighbors.iter().map(ToString::to_string).collect(),
        }
    }

    fn header(observed: &str) -> Observation {
        Observation::Identifier {
            observed: observed.to_string(),
            expected: ExpectedPrefix::Code,
        }
    }

    fn reverse(observed: &str, ip: &str) -> Observation {
        Observation::Identifier {
            observed: observed.to_string(),
            expected: ExpectedPrefix::ReverseDns {
                ip: ip.parse().unwrap(),
            },
        }
    }

    #[test]
    fn own_code_prefix_is_ok() {
        let verdict = classify(&pop("NRT", &[]), &header("NRT52-P1"));
        assert_eq!(verdict, Verdict::Ok);
    }

    #[test]
    fn neighbor_prefix_is_neighbor() {
        let verdict = classify(&pop("NRT", &["KIX"]), &header("KIX50-C2"));
        assert_eq!(
            verdict,
            Verdict::Neighbor {
                observed: "KIX50-C2".into(),
                matched: "KIX".into(),
            }
        );
    }

    #[test]
    fn unknown_prefix_is_mismatch() {
        let verdict = classify(&pop("LHR", &[]), &header("CDG40-P3"));
        assert_eq!(
            verdict,
            Verdict::Mismatch {
                observed: "CDG40-P3".into()
            }
        );
    }

    #[test]
    fn reverse_dns_prefix_is_ok() {
        let verdict = classify(
            &pop("SIN", &[]),
            &reverse("server-9-9-9-9.sin1.example.net", "9.9.9.9"),
        );
        assert_eq!(verdict, Verdict::Ok);
    }

    #[test]
    fn no_address_is_unresolved() {
        let verdict = classify(&pop("GRU", &[]), &Observation::NoAddress);
        assert_eq!(verdict, Verdict::Unresolved);
    }

    #[test]
    fn matching_is_case_insensitive_both_ways() {
        assert_eq!(classify(&pop("nrt", &[]), &header("NRT52-P1")), Verdict::Ok);
        assert_eq!(classify(&pop("NRT", &[]), &header("nrt52-p1")), Verdict::Ok);
        assert_eq!(
            classify(&pop("NRT", &["kix"]), &header("KIX50-C2")),
            Verdict::Neighbor {
                observed: "KIX50-C2".into(),
                matched: "kix".into(),
            }
        );
    }

    #[test]
    fn first_declared_neighbor_wins() {
        // "KIX50-C2" starts with both declared codes; "KI" is declared first
        let verdict = classify(&pop("NRT", &["KI", "KIX"]), &header("KIX50-C2"));
        assert_eq!(
            verdict,
            Verdict::Neighbor {
                observed: "KIX50-C2".into(),
                matched: "KI".into(),
            }
        );
    }

    #[test]
    fn empty_observed_is_mismatch_not_unresolved() {
        let verdict = classify(&pop("NRT", &["KIX"]), &header(""));
        assert_eq!(verdict, Verdict::Mismatch { observed: String::new() });
    }

    #[test]
    fn reverse_dns_neighbor_substitutes_code_segment() {
        let verdict = classify(
            &pop("SIN", &["KUL"]),
            &reverse("server-9-9-9-9.kul2.example.net", "9.9.9.9"),
        );
        assert_eq!(
            verdict,
            Verdict::Neighbor {
                observed: "server-9-9-9-9.kul2.example.net".into(),
                matched: "KUL".into(),
            }
        );
    }

    #[test]
    fn reverse_dns_wrong_ip_segment_is_mismatch() {
        // Right code, wrong address segment: still a mismatch
        let verdict = classify(
            &pop("SIN", &[]),
            &reverse("server-8-8-8-8.sin1.example.net", "9.9.9.9"),
        );
        assert_eq!(
            verdict,
            Verdict::Mismatch {
                observed: "server-8-8-8-8.sin1.example.net".into()
            }
        );
    }

    #[test]
    fn ipv6_addresses_use_dash_separators() {
        let prefix = ExpectedPrefix::ReverseDns {
            ip: "2001:db8::1".parse().unwrap(),
        };
        assert_eq!(prefix.for_code("SIN"), "server-2001-db8--1.sin");
    }

    #[test]
    fn classify_is_idempotent() {
        let p = pop("NRT", &["KIX"]);
        let obs = header("KIX50-C2");
        assert_eq!(classify(&p, &obs), classify(&p, &obs));
    }
}
