//! Edge PoP routing verification for anycast/CDN networks.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use popwatch::{HeaderProbe, ProbeRunner, Registry};
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> popwatch::Result<()> {
//!     let registry = Registry::load(Path::new("pop.json"))?;
//!
//!     let probe = HeaderProbe::new(
//!         "d.example.net",
//!         popwatch::DEFAULT_HEADER,
//!         Duration::from_secs(5),
//!     )?;
//!
//!     let runner = ProbeRunner::default();
//!     for report in runner.run(Arc::new(probe), registry.pops()).await {
//!         println!("{}: {:?}", report.code, report.verdict);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/popwatch/0.3.0")]

// Re-export core types
pub use popwatch_core::*;

// Re-export the directory client
pub use popwatch_client::{DirectoryClient, DirectoryClientBuilder};

// Re-export probes
pub use popwatch_probe::{
    default_resolver, HeaderProbe, Probe, ProbeError, ProbeKind, ProbeResult, ProbeRunner,
    SubnetProbe, DEFAULT_CONCURRENCY, DEFAULT_HEADER,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
