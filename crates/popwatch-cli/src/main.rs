//! popwatch - Edge PoP routing verification
//!
//! Checks that every PoP in the registry actually serves the traffic it
//! is supposed to, via response headers or subnet-steered DNS.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    popwatch_cli::run().await
}
