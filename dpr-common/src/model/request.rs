// dpr-common/src/model/request.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::dependency::{ExplicitHint, Requirement};
use crate::model::{ApplicationId, CandidateModule, ModuleId};

/// Everything one resolution needs. Built fresh per request and dropped once
/// the descriptor (or the failure) has been produced.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub application: ApplicationId,
    /// Declared application content, in declaration order.
    pub content: Vec<Requirement>,
    /// Modules shipped inside the application itself.
    pub local_candidates: Vec<Arc<CandidateModule>>,
    pub hints: Vec<ExplicitHint>,
    /// Extra module requirements the deployer wants honoured, e.g. when
    /// re-checking an imported deployment.
    pub constraints: Vec<Requirement>,
    /// Service-level requirements, handed to the descriptor untouched.
    pub service_requirements: Value,
}

impl ResolutionRequest {
    pub fn new(application: ApplicationId) -> Self {
        Self {
            application,
            content: Vec::new(),
            local_candidates: Vec::new(),
            hints: Vec::new(),
            constraints: Vec::new(),
            service_requirements: Value::Null,
        }
    }

    pub fn with_content(mut self, content: impl IntoIterator<Item = Requirement>) -> Self {
        self.content.extend(content);
        self
    }

    pub fn with_local_candidates(
        mut self,
        candidates: impl IntoIterator<Item = CandidateModule>,
    ) -> Self {
        self.local_candidates
            .extend(candidates.into_iter().map(Arc::new));
        self
    }

    pub fn with_hints(mut self, hints: impl IntoIterator<Item = ExplicitHint>) -> Self {
        self.hints.extend(hints);
        self
    }

    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = Requirement>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn with_service_requirements(mut self, services: Value) -> Self {
        self.service_requirements = services;
        self
    }

    /// True when `id` names one of the declared content modules.
    pub fn is_content(&self, id: &ModuleId) -> bool {
        self.content.iter().any(|req| req.matches_id(id))
    }

    pub fn is_hinted(&self, id: &ModuleId) -> bool {
        self.hints.iter().any(|hint| hint.matches(id))
    }

    /// Requirements for the first resolver call: content, then hints, then
    /// constraints.
    pub fn seed_requirements(&self) -> Vec<Requirement> {
        self.content
            .iter()
            .cloned()
            .chain(self.hints.iter().map(|hint| hint.requirement().clone()))
            .chain(self.constraints.iter().cloned())
            .collect()
    }

    pub fn local_identities(&self) -> BTreeSet<&ModuleId> {
        self.local_candidates.iter().map(|m| &m.id).collect()
    }
}
