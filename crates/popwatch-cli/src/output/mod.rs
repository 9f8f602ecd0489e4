//! Output formatting for report lines and formats.

use clap::ValueEnum;
use colored::Colorize;
use popwatch::{PopReport, ProbeKind, Verdict};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per PoP
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render one report as its human-readable line.
///
/// The wording differs per strategy: header probes observe a location
/// identifier, subnet probes observe a DNS name.
#[must_use]
pub fn report_line(report: &PopReport, kind: ProbeKind) -> String {
    match &report.verdict {
        Verdict::Ok => format!("{} is OK", report.code),
        Verdict::Neighbor { observed, .. } => match kind {
            ProbeKind::Header => {
                format!("{} is in {} which is a neighbor", report.code, observed)
            }
            ProbeKind::Subnet => {
                format!("{} gets DNS name {} which is a neighbor", report.code, observed)
            }
        },
        Verdict::Mismatch { observed } => match kind {
            ProbeKind::Header => {
                format!("{} gets unexpected location {}", report.code, observed)
            }
            ProbeKind::Subnet => {
                format!("{} gets unexpected DNS name {}", report.code, observed)
            }
        },
        Verdict::Unresolved => format!("Cannot find IP address for {}", report.code),
    }
}

/// Print one colored line per report.
pub fn print_pretty(reports: &[PopReport], kind: ProbeKind) {
    for report in reports {
        let line = report_line(report, kind);
        match &report.verdict {
            Verdict::Ok => println!("{}", line.green()),
            Verdict::Neighbor { .. } => println!("{}", line.yellow()),
            Verdict::Mismatch { .. } | Verdict::Unresolved => println!("{}", line.red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(code: &str, verdict: Verdict) -> PopReport {
        PopReport {
            id: format!("{code}-id"),
            code: code.to_string(),
            verdict,
            ip: None,
        }
    }

    #[test]
    fn ok_line_is_shared_between_strategies() {
        let r = report("NRT", Verdict::Ok);
        assert_eq!(report_line(&r, ProbeKind::Header), "NRT is OK");
        assert_eq!(report_line(&r, ProbeKind::Subnet), "NRT is OK");
    }

    #[test]
    fn neighbor_lines_differ_per_strategy() {
        let r = report(
            "NRT",
            Verdict::Neighbor {
                observed: "KIX50-C2".into(),
                matched: "KIX".into(),
            },
        );
        assert_eq!(
            report_line(&r, ProbeKind::Header),
            "NRT is in KIX50-C2 which is a neighbor"
        );

        let r = report(
            "SIN",
            Verdict::Neighbor {
                observed: "server-9-9-9-9.kul2.example.net".into(),
                matched: "KUL".into(),
            },
        );
        assert_eq!(
            report_line(&r, ProbeKind::Subnet),
            "SIN gets DNS name server-9-9-9-9.kul2.example.net which is a neighbor"
        );
    }

    #[test]
    fn mismatch_lines_differ_per_strategy() {
        let r = report(
            "LHR",
            Verdict::Mismatch {
                observed: "CDG40-P3".into(),
            },
        );
        assert_eq!(
            report_line(&r, ProbeKind::Header),
            "LHR gets unexpected location CDG40-P3"
        );

        let r = report(
            "SIN",
            Verdict::Mismatch {
                observed: "server-8-8-8-8.cdg1.example.net".into(),
            },
        );
        assert_eq!(
            report_line(&r, ProbeKind::Subnet),
            "SIN gets unexpected DNS name server-8-8-8-8.cdg1.example.net"
        );
    }

    #[test]
    fn unresolved_line_names_the_pop() {
        let r = report("GRU", Verdict::Unresolved);
        assert_eq!(
            report_line(&r, ProbeKind::Subnet),
            "Cannot find IP address for GRU"
        );
    }
}
