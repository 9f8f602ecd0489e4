//! Core types and the verdict engine for PoP location verification.
//!
//! This crate provides the foundational pieces used across popwatch:
//!
//! - **Types**: registry records ([`Pop`], [`ListedPop`]), directory API
//!   payloads, and verification outcomes ([`Verdict`], [`PopReport`])
//! - **Verdict engine**: [`classify`] turns a probe's [`Observation`] into
//!   a verdict by case-insensitive prefix matching with neighbor tolerance
//! - **Registry**: the [`Registry`] file model with listing filtering and
//!   annotation merging
//! - **Errors**: [`PopwatchError`] with a [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use popwatch_core::{classify, ExpectedPrefix, Observation, Pop, Verdict};
//!
//! let pop = Pop {
//!     id: "NRT57".into(),
//!     name: None,
//!     location: None,
//!     country: None,
//!     subnet: "1.2.3.0/24".parse().unwrap(),
//!     code: "NRT".into(),
//!     neighbors: vec!["KIX".into()],
//! };
//!
//! let observation = Observation::Identifier {
//!     observed: "KIX50-C2".into(),
//!     expected: ExpectedPrefix::Code,
//! };
//!
//! assert!(matches!(classify(&pop, &observation), Verdict::Neighbor { .. }));
//! ```

#![doc(html_root_url = "https://docs.rs/popwatch-core/0.3.0")]

mod error;
pub mod registry;
pub mod types;
mod verify;

pub use error::{PopwatchError, Result};
pub use registry::{load_listing, merge_annotations, save_listing, FilterWarning, Registry};
pub use types::*;
pub use verify::{classify, ExpectedPrefix, Observation};
