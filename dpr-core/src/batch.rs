// dpr-core/src/batch.rs
use std::sync::Arc;

use crossbeam_channel::bounded;
use dpr_common::classification::ClassifiedSet;
use dpr_common::dependency::CapabilityResolver;
use dpr_common::error::{DprError, Result};
use dpr_common::model::{ApplicationId, ResolutionRequest};
use threadpool::ThreadPool;
use tracing::{debug, error, instrument};

use crate::orchestrator::{DeploymentResolver, ResolutionSettings};

#[derive(Debug)]
pub struct BatchOutcome {
    pub application: ApplicationId,
    pub result: Result<ClassifiedSet>,
}

/// Resolves independent applications on a worker pool sharing one resolver.
/// Outcomes come back in request order.
#[instrument(skip_all, name = "batch_resolver")]
pub fn resolve_batch(
    resolver: Arc<dyn CapabilityResolver>,
    requests: Vec<ResolutionRequest>,
    settings: ResolutionSettings,
    workers: usize,
) -> Vec<BatchOutcome> {
    let count = requests.len();
    if count == 0 {
        return Vec::new();
    }

    let num_workers = workers.clamp(1, count);
    let pool = ThreadPool::new(num_workers);
    debug!(
        "Batch resolver started with {} workers for {} application(s).",
        num_workers, count
    );

    let applications: Vec<ApplicationId> =
        requests.iter().map(|r| r.application.clone()).collect();
    let (result_tx, result_rx) = bounded::<(usize, Result<ClassifiedSet>)>(count);

    for (index, request) in requests.into_iter().enumerate() {
        let resolver = Arc::clone(&resolver);
        let settings = settings.clone();
        let result_tx = result_tx.clone();

        debug!("[{}] Submitting resolution to worker pool.", request.application);
        pool.execute(move || {
            let result = DeploymentResolver::new(resolver.as_ref())
                .with_settings(settings)
                .resolve(&request);
            debug!(
                "[{}] Worker finished, result ok: {}",
                request.application,
                result.is_ok()
            );
            let _ = result_tx.send((index, result));
        });
    }
    drop(result_tx);

    let mut results: Vec<Option<Result<ClassifiedSet>>> = (0..count).map(|_| None).collect();
    for (index, result) in result_rx {
        results[index] = Some(result);
    }
    pool.join();

    applications
        .into_iter()
        .zip(results)
        .map(|(application, result)| {
            let result = result.unwrap_or_else(|| {
                error!("[{}] Worker exited without a result.", application);
                Err(DprError::Generic(format!(
                    "resolution worker for {application} exited without a result"
                )))
            });
            BatchOutcome {
                application,
                result,
            }
        })
        .collect()
}
