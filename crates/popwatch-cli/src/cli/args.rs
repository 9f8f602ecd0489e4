//! Command-line argument definitions using clap.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Verify that edge PoPs route traffic where they should
///
/// Probes every PoP in the registry against a domain under test and
/// reports, per PoP, whether the observed routing is the PoP itself, an
/// acceptable neighbor, or something unexpected.
#[derive(Parser, Debug)]
#[command(name = "popwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the canonical registry file (pop.json)
    #[arg(long, global = true, env = "POPWATCH_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Path to the full listing file (pop_all.json)
    #[arg(long, global = true, env = "POPWATCH_LISTING")]
    pub listing: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify where each PoP's traffic actually lands
    Check(CheckArgs),

    /// Maintain the PoP registry files
    Registry(RegistryArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub command: CheckCommands,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Probe `{code}.{domain}` per PoP and read the routing-identifier
    /// response header
    Endpoint {
        /// Domain under test
        domain: String,

        /// Response header carrying the routing identifier
        #[arg(long, default_value = popwatch::DEFAULT_HEADER)]
        header: String,

        #[command(flatten)]
        common: CheckCommon,
    },

    /// Resolve the domain as if from inside each PoP's subnet and verify
    /// the reverse-DNS name of the routed address
    Subnet {
        /// Domain under test
        domain: String,

        /// Recursive resolver to query (defaults to 8.8.8.8:53)
        #[arg(long)]
        resolver: Option<SocketAddr>,

        #[command(flatten)]
        common: CheckCommon,
    },
}

/// Flags shared by both check strategies
#[derive(Args, Debug)]
pub struct CheckCommon {
    /// Maximum in-flight probes
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Exit non-zero when any PoP fails verification
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Registry command
// ============================================================================

#[derive(Args, Debug)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommands,
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommands {
    /// Fetch the edge-location listing from the public directory,
    /// carrying existing code/subnet/neighbor annotations over
    Fetch,

    /// Filter the listing down to the verified registry (entries with
    /// both code and subnet)
    Filter,

    /// Print the verified registry
    Show,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Print the config file path
    Path,
}
