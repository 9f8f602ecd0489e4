//! `popwatch registry` - Maintain the PoP registry files.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{RegistryArgs, RegistryCommands};
use crate::output::OutputFormat;
use popwatch::{
    load_listing, merge_annotations, save_listing, DirectoryClient, ListedPop, Registry,
};

pub async fn execute(ctx: Context, args: RegistryArgs) -> Result<()> {
    match args.command {
        RegistryCommands::Fetch => fetch(ctx).await,
        RegistryCommands::Filter => filter(&ctx),
        RegistryCommands::Show => show(&ctx),
    }
}

/// Pull the current listing from the directory and write it out, keeping
/// whatever annotations already exist on disk.
async fn fetch(ctx: Context) -> Result<()> {
    let listing_path = ctx.listing_path()?;

    let client = DirectoryClient::new();
    let mut fetched = client.edge_locations().await?;

    // Annotations live in our files, not the directory: pull them from
    // the previous listing, letting the verified registry override
    let mut existing = load_listing(&listing_path).unwrap_or_default();
    if let Ok(registry) = Registry::load(&ctx.registry_path()?) {
        existing.extend(registry.into_iter().map(ListedPop::from));
    }
    merge_annotations(&mut fetched, &existing);

    save_listing(&fetched, &listing_path)?;

    let annotated = fetched.iter().filter(|p| p.is_verified()).count();
    println!(
        "Fetched {} edge locations into {} ({} annotated)",
        fetched.len(),
        listing_path.display(),
        annotated
    );

    Ok(())
}

/// Reduce the listing to the verified registry.
fn filter(ctx: &Context) -> Result<()> {
    let listing = load_listing(&ctx.listing_path()?)?;
    let (registry, warnings) = Registry::from_listing(&listing);

    for warning in &warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    let path = ctx.registry_path()?;
    registry.save(&path)?;
    println!("Wrote {} verified PoPs to {}", registry.len(), path.display());

    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let registry = ctx.load_registry()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(registry.pops())?);
        }
        OutputFormat::Pretty => {
            for pop in registry.iter() {
                let place = match (&pop.location, &pop.country) {
                    (Some(location), Some(country)) => format!("{location}, {country}"),
                    (Some(location), None) => location.clone(),
                    _ => String::new(),
                };
                let neighbors = if pop.neighbors.is_empty() {
                    String::new()
                } else {
                    format!("  neighbors: {}", pop.neighbors.join(", "))
                };
                println!(
                    "{:6} {:20} {}{}",
                    pop.code.cyan(),
                    pop.subnet.to_string(),
                    place,
                    neighbors.dimmed()
                );
            }
        }
    }

    Ok(())
}
