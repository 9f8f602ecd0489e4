//! Probe strategies for PoP location verification.
//!
//! Both strategies answer the same question — "where did this PoP's
//! traffic actually land?" — through different channels:
//!
//! - [`HeaderProbe`] asks the edge itself, by reading a routing-identifier
//!   response header off a PoP-specific hostname.
//! - [`SubnetProbe`] asks the DNS, by steering a resolution with the PoP's
//!   subnet (EDNS client-subnet) and reverse-resolving the answer.
//!
//! Everything downstream of a probe is shared: observations feed
//! [`popwatch_core::classify`] and come back as verdicts. `observe` never
//! fails — transport problems degrade to an empty or absent observation
//! for that PoP so the rest of the registry still gets checked.

#![doc(html_root_url = "https://docs.rs/popwatch-probe/0.3.0")]

mod error;
mod header;
mod runner;
mod subnet;

pub use error::{ProbeError, ProbeResult};
pub use header::{HeaderProbe, DEFAULT_HEADER};
pub use runner::{ProbeRunner, DEFAULT_CONCURRENCY};
pub use subnet::{default_resolver, SubnetProbe};

use async_trait::async_trait;
use popwatch_core::{Observation, Pop};

/// Which strategy produced an observation. Report wording differs per
/// strategy, nothing else does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Response-header inspection
    Header,
    /// Subnet-steered resolution plus reverse lookup
    Subnet,
}

/// A probe strategy: turn one PoP into one observation
#[async_trait]
pub trait Probe: Send + Sync {
    /// The strategy this probe implements
    fn kind(&self) -> ProbeKind;

    /// Probe one PoP. Infallible by contract: transport failures are
    /// logged and absorbed into the observation.
    async fn observe(&self, pop: &Pop) -> Observation;
}
