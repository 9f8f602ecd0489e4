//! `popwatch config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let display_path = |path: &Option<std::path::PathBuf>| {
                path.as_ref()
                    .map_or_else(|| "(default)".to_string(), |p| p.display().to_string())
            };

            println!("  {} {}", "registry:".bold(), display_path(&config.registry));
            println!("  {} {}", "listing:".bold(), display_path(&config.listing));
            println!(
                "  {} {}",
                "resolver:".bold(),
                config
                    .resolver
                    .map_or_else(|| "(default)".to_string(), |r| r.to_string())
            );
            println!(
                "  {} {}",
                "concurrency:".bold(),
                config
                    .concurrency
                    .map_or_else(|| "(default)".to_string(), |c| c.to_string())
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!("  {} {}", "strict:".bold(), config.strict);
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "registry" => {
            config.registry = Some(value.into());
            println!("{} registry set to {}.", "Success:".green().bold(), value.cyan());
        }
        "listing" => {
            config.listing = Some(value.into());
            println!("{} listing set to {}.", "Success:".green().bold(), value.cyan());
        }
        "resolver" => {
            config.resolver = Some(value.parse()?);
            println!("{} resolver set to {}.", "Success:".green().bold(), value.cyan());
        }
        "concurrency" => {
            config.concurrency = Some(value.parse()?);
            println!("{} concurrency set to {}.", "Success:".green().bold(), value);
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            println!("{} output format set to {}.", "Success:".green().bold(), value.cyan());
        }
        "strict" => {
            config.strict = value.parse()?;
            println!("{} strict set to {}.", "Success:".green().bold(), value);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 registry       - Path to the canonical registry (pop.json)\n  \
                 listing        - Path to the full listing (pop_all.json)\n  \
                 resolver       - Recursive resolver for subnet checks (addr:port)\n  \
                 concurrency    - Maximum in-flight probes\n  \
                 output_format  - Default output format (pretty/json)\n  \
                 strict         - Exit non-zero on failed verification (true/false)",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
