// dpr-common/src/classification.rs
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dependency::Requirement;
use crate::descriptor::{DeployedEntry, DeploymentDescriptor};
use crate::model::{ApplicationId, CandidateModule, ModuleId};

/// Deployment role of a resolved module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Isolated inside the application.
    Content,
    /// Shared, and explicitly asked for by the deployer.
    Use,
    /// Shared, pulled in by the resolver on its own.
    Provision,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => write!(f, "content"),
            Self::Use => write!(f, "use"),
            Self::Provision => write!(f, "provision"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedModule {
    pub module: Arc<CandidateModule>,
    pub classification: Classification,
}

impl ClassifiedModule {
    pub fn id(&self) -> &ModuleId {
        &self.module.id
    }
}

/// Result of a successful resolution. Every module carries exactly one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSet {
    application: ApplicationId,
    modules: Vec<ClassifiedModule>,
    imports: Vec<Requirement>,
    service_requirements: Value,
    rounds: usize,
}

impl ClassifiedSet {
    pub fn new(
        application: ApplicationId,
        mut modules: Vec<ClassifiedModule>,
        imports: Vec<Requirement>,
        service_requirements: Value,
        rounds: usize,
    ) -> Self {
        modules.sort_by(|a, b| a.id().cmp(b.id()));
        modules.dedup_by(|a, b| a.id() == b.id());
        Self {
            application,
            modules,
            imports,
            service_requirements,
            rounds,
        }
    }

    pub fn application(&self) -> &ApplicationId {
        &self.application
    }

    pub fn modules(&self) -> &[ClassifiedModule] {
        &self.modules
    }

    pub fn tagged(&self, tag: Classification) -> impl Iterator<Item = &ModuleId> + '_ {
        self.modules
            .iter()
            .filter(move |m| m.classification == tag)
            .map(ClassifiedModule::id)
    }

    pub fn content(&self) -> Vec<&ModuleId> {
        self.tagged(Classification::Content).collect()
    }

    pub fn used(&self) -> Vec<&ModuleId> {
        self.tagged(Classification::Use).collect()
    }

    pub fn provisioned(&self) -> Vec<&ModuleId> {
        self.tagged(Classification::Provision).collect()
    }

    /// Tag of the first module named `name`, if it was deployed at all.
    pub fn classification_of(&self, name: &str) -> Option<Classification> {
        self.modules
            .iter()
            .find(|m| m.module.name() == name)
            .map(|m| m.classification)
    }

    /// Requirements of the content that the shared modules satisfy.
    pub fn imports(&self) -> &[Requirement] {
        &self.imports
    }

    pub fn service_requirements(&self) -> &Value {
        &self.service_requirements
    }

    /// Stability probes it took to reach the fixpoint.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn descriptor(&self) -> DeploymentDescriptor {
        let entries = |tag: Classification| {
            self.tagged(tag)
                .map(|id| DeployedEntry {
                    name: id.name.clone(),
                    deployed_version: id.version.clone(),
                })
                .collect::<Vec<_>>()
        };
        DeploymentDescriptor {
            application: self.application.clone(),
            content: entries(Classification::Content),
            use_bundle: entries(Classification::Use),
            provision: entries(Classification::Provision),
            imports: self.imports.clone(),
            service_requirements: self.service_requirements.clone(),
        }
    }
}
