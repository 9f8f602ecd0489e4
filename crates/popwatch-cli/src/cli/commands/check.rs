//! `popwatch check` - Verify where each PoP's traffic lands.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use super::Context;
use crate::cli::args::{CheckArgs, CheckCommands, CheckCommon};
use crate::output::{self, OutputFormat};
use popwatch::{default_resolver, HeaderProbe, Probe, ProbeRunner, SubnetProbe, DEFAULT_CONCURRENCY};

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    match args.command {
        CheckCommands::Endpoint {
            domain,
            header,
            common,
        } => {
            let probe = HeaderProbe::new(domain, header, Duration::from_secs(common.timeout))?;
            run_check(ctx, Arc::new(probe), &common).await
        }
        CheckCommands::Subnet {
            domain,
            resolver,
            common,
        } => {
            let resolver = resolver
                .or(ctx.config.resolver)
                .unwrap_or_else(default_resolver);
            let probe = SubnetProbe::new(&domain, resolver, Duration::from_secs(common.timeout))?;
            run_check(ctx, Arc::new(probe), &common).await
        }
    }
}

async fn run_check(ctx: Context, probe: Arc<dyn Probe>, common: &CheckCommon) -> Result<()> {
    let registry = ctx.load_registry()?;
    let kind = probe.kind();

    let concurrency = common
        .concurrency
        .or(ctx.config.concurrency)
        .unwrap_or(DEFAULT_CONCURRENCY);

    let runner = ProbeRunner::new(concurrency);
    let reports = runner.run(probe, registry.pops()).await;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Pretty => {
            output::print_pretty(&reports, kind);
        }
    }

    // Verdicts are informational by default; strict mode turns any
    // non-pass into a non-zero exit
    if common.strict || ctx.config.strict {
        let failed = reports.iter().filter(|r| !r.verdict.is_pass()).count();
        if failed > 0 {
            anyhow::bail!("{failed} of {} PoPs failed verification", reports.len());
        }
    }

    Ok(())
}
