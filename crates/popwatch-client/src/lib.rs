//! HTTP client for the public PoP directory API.
//!
//! The directory is the source of truth for which edge locations exist;
//! [`DirectoryClient::edge_locations`] pulls the full listing that the
//! registry is refreshed from.

#![doc(html_root_url = "https://docs.rs/popwatch-client/0.3.0")]

mod client;

pub use client::{DirectoryClient, DirectoryClientBuilder};
