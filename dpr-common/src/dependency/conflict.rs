// dpr-common/src/dependency/conflict.rs
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ApplicationId, ModuleId};

/// A shared module that can only be completed by a module isolated inside
/// the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub consumer: ModuleId,
    pub missing_capability: String,
    pub isolated_providers: BTreeSet<ModuleId>,
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.isolated_providers.len() > 1 {
            "bundles"
        } else {
            "bundle"
        };
        let providers = self
            .isolated_providers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Shared bundle {} has a dependency for package {} which is exported from isolated {} [{}]",
            self.consumer, self.missing_capability, noun, providers
        )
    }
}

/// Every isolation conflict found in one round, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub application: ApplicationId,
    conflicts: Vec<ConflictRecord>,
}

impl ResolutionFailure {
    /// Sorts by consumer name, then capability, then consumer version.
    pub fn new(application: ApplicationId, mut conflicts: Vec<ConflictRecord>) -> Self {
        conflicts.sort_by(|a, b| {
            a.consumer
                .name
                .cmp(&b.consumer.name)
                .then_with(|| a.missing_capability.cmp(&b.missing_capability))
                .then_with(|| a.consumer.version.cmp(&b.consumer.version))
        });
        conflicts.dedup();
        Self {
            application,
            conflicts,
        }
    }

    pub fn conflicts(&self) -> &[ConflictRecord] {
        &self.conflicts
    }

    pub fn messages(&self) -> Vec<String> {
        self.conflicts.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Suspected circular dependencies in application {}:",
            self.application
        )?;
        for record in &self.conflicts {
            write!(f, "\n{record}")?;
        }
        Ok(())
    }
}
