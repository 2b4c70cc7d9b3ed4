// dpr-core/src/orchestrator/mod.rs
//! Deployment resolution orchestrator.
//!
//! One seed resolve determines the application content and the first shared
//! frontier. Stability probes then ask the resolver to satisfy the content's
//! external requirements and the resolve constraints again, with the
//! application content itself kept out of the requirement list. A probe that
//! pulls content back in fails the resolution when a module of the old or new
//! frontier depends on it; otherwise the pulled content is ignored. The
//! remaining shared frontier is then either:
//!
//! * the same as before (done), or
//! * smaller or different (unused hints dropped, probe again).
//!
//! Probes are bounded so a resolver that keeps changing its answer cannot
//! spin forever.
pub mod classify;
pub mod conflict;
pub mod frontier;

use std::collections::BTreeSet;
use std::sync::Arc;

use dpr_common::classification::ClassifiedSet;
use dpr_common::config::Config;
use dpr_common::dependency::{CapabilityResolver, Requirement, ResolutionFailure};
use dpr_common::error::{DprError, Result};
use dpr_common::model::{CandidateModule, ResolutionRequest};
use tracing::{debug, error, instrument, warn};

use self::classify::{classify, external_requirements};
use self::conflict::find_conflicts;
use self::frontier::{partition, Frontier, Partition};

#[derive(Debug, Clone, Default)]
pub struct ResolutionSettings {
    /// Fixed probe bound. `None` derives it from the request.
    pub max_rounds: Option<usize>,
}

impl From<&Config> for ResolutionSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_rounds: config.max_rounds,
        }
    }
}

pub struct DeploymentResolver<'a, R: CapabilityResolver + ?Sized> {
    resolver: &'a R,
    settings: ResolutionSettings,
}

impl<'a, R: CapabilityResolver + ?Sized> DeploymentResolver<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            settings: ResolutionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ResolutionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolves and classifies one application.
    ///
    /// Resolver failures are returned unchanged. Isolation conflicts are
    /// aggregated into a single [`DprError::IsolationConflict`].
    #[instrument(skip_all, fields(application = %request.application))]
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<ClassifiedSet> {
        let application = &request.application;
        debug!(
            "Seed resolve with {} content requirement(s), {} hint(s), {} constraint(s), {} local candidate(s)",
            request.content.len(),
            request.hints.len(),
            request.constraints.len(),
            request.local_candidates.len()
        );

        let seed = self.resolver.resolve(
            application,
            &request.local_candidates,
            &request.seed_requirements(),
        )?;
        if seed.is_empty() {
            error!("Seed resolve returned no modules");
            return Err(DprError::EmptyDeploymentContent(application.to_string()));
        }

        let Partition { content, shared } = partition(seed, request);
        if content.is_empty() {
            error!("Seed resolve returned no module matching the declared content");
            return Err(DprError::EmptyDeploymentContent(application.to_string()));
        }
        debug!("Content: [{}]", content.describe());
        debug!("Initial shared frontier: [{}]", shared.describe());

        let imports = external_requirements(&content);
        let targets = stability_targets(request, &imports);
        let limit = self.round_limit(request, &content, &shared);
        let (stable, rounds) = self.stabilize(request, &targets, shared, limit)?;

        debug!(
            "Resolved after {} probe(s): {} content, {} shared",
            rounds,
            content.len(),
            stable.len()
        );
        Ok(classify(request, &content, &stable, imports, rounds))
    }

    fn round_limit(&self, request: &ResolutionRequest, content: &Frontier, shared: &Frontier) -> usize {
        if let Some(limit) = self.settings.max_rounds {
            return limit;
        }
        let mut identities: BTreeSet<_> = request.local_identities();
        identities.extend(content.ids());
        identities.extend(shared.ids());
        identities.len() + 1
    }

    fn stabilize(
        &self,
        request: &ResolutionRequest,
        targets: &[Requirement],
        initial: Frontier,
        limit: usize,
    ) -> Result<(Frontier, usize)> {
        let mut current = initial;

        for round in 1..=limit {
            let probe = self.probe(request, targets, &current)?;
            let Partition {
                content: pulled,
                shared: next,
            } = partition(probe, request);

            if !pulled.is_empty() {
                let conflicts = find_conflicts(&current.union(&next), &pulled);
                if !conflicts.is_empty() {
                    error!(
                        "Probe {} pulled content [{}] into the shared frontier; {} conflict(s)",
                        round,
                        pulled.describe(),
                        conflicts.len()
                    );
                    return Err(DprError::IsolationConflict(ResolutionFailure::new(
                        request.application.clone(),
                        conflicts,
                    )));
                }
                warn!(
                    "Probe {} pulled content [{}] but no shared module depends on it; ignoring",
                    round,
                    pulled.describe()
                );
            }

            if next.same_identities(&current) {
                debug!("Shared frontier stable after {} probe(s)", round);
                return Ok((current, round));
            }

            let dropped = current.difference(&next);
            let added = next.difference(&current);
            if added.is_empty() {
                debug!("Probe {} dropped unused shared modules {:?}", round, dropped);
            } else {
                warn!(
                    "Probe {} changed the shared frontier: added {:?}, dropped {:?}",
                    round, added, dropped
                );
            }
            current = next;
        }

        error!("Shared frontier still moving after {} probe(s)", limit);
        Err(DprError::NonConvergence {
            application: request.application.to_string(),
            rounds: limit,
        })
    }

    /// Re-resolves the stability targets against the current frontier plus the
    /// local candidates.
    fn probe(
        &self,
        request: &ResolutionRequest,
        targets: &[Requirement],
        frontier: &Frontier,
    ) -> Result<Vec<Arc<CandidateModule>>> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }
        let mut pool = frontier.to_vec();
        pool.extend(
            request
                .local_candidates
                .iter()
                .filter(|candidate| !frontier.contains(&candidate.id))
                .cloned(),
        );
        self.resolver.resolve(&request.application, &pool, targets)
    }
}

/// The content's external requirements followed by the resolve constraints,
/// so constraint-selected modules stay in the frontier across probes.
fn stability_targets(request: &ResolutionRequest, imports: &[Requirement]) -> Vec<Requirement> {
    let mut targets = imports.to_vec();
    for constraint in &request.constraints {
        if !targets.contains(constraint) {
            targets.push(constraint.clone());
        }
    }
    targets
}

/// Shorthand for a one-off resolution with default settings.
pub fn resolve_deployment<R: CapabilityResolver + ?Sized>(
    resolver: &R,
    request: &ResolutionRequest,
) -> Result<ClassifiedSet> {
    DeploymentResolver::new(resolver).resolve(request)
}
