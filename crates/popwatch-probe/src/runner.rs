//! Concurrent probe fan-out over a registry.

use crate::Probe;
use popwatch_core::{classify, ExpectedPrefix, Observation, Pop, PopReport, Verdict};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// Concurrent probes unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fans one probe out over a whole registry with a bounded number of
/// in-flight probes.
///
/// Reports come back in registry order regardless of completion order,
/// and every PoP yields exactly one report: a task that dies is reported
/// as unresolved rather than taking the run down with it.
pub struct ProbeRunner {
    concurrency: usize,
}

impl Default for ProbeRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl ProbeRunner {
    /// Create a runner with the given concurrency limit (minimum 1)
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// Probe and classify every PoP
    pub async fn run(&self, probe: Arc<dyn Probe>, pops: &[Pop]) -> Vec<PopReport> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(pops.len());

        for pop in pops {
            let semaphore = Arc::clone(&semaphore);
            let probe = Arc::clone(&probe);
            let pop = pop.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.ok()?;

                let observation = probe.observe(&pop).await;
                let ip = match &observation {
                    Observation::Identifier {
                        expected: ExpectedPrefix::ReverseDns { ip },
                        ..
                    } => Some(*ip),
                    _ => None,
                };
                let verdict = classify(&pop, &observation);

                Some(PopReport {
                    id: pop.id,
                    code: pop.code,
                    verdict,
                    ip,
                })
            }));
        }

        let mut reports = Vec::with_capacity(pops.len());
        for (handle, pop) in handles.into_iter().zip(pops) {
            match handle.await {
                Ok(Some(report)) => reports.push(report),
                Ok(None) | Err(_) => {
                    warn!(code = %pop.code, "probe task died, reporting as unresolved");
                    reports.push(PopReport {
                        id: pop.id.clone(),
                        code: pop.code.clone(),
                        verdict: Verdict::Unresolved,
                        ip: None,
                    });
                }
            }
        }

        reports
    }
}
