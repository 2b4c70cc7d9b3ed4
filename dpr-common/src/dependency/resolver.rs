// dpr-common/src/dependency/resolver.rs
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dependency::Requirement;
use crate::error::Result;
use crate::model::{ApplicationId, CandidateModule, ModuleId};

/// Turns a candidate pool plus a set of requirements into a consistent
/// module closure.
///
/// Implementations must be callable repeatedly, with different pools, within
/// one orchestration, and from several threads at once. When a requirement
/// has no satisfying module anywhere the implementation returns
/// [`DprError::UnsatisfiableRequirement`](crate::error::DprError::UnsatisfiableRequirement).
pub trait CapabilityResolver: Send + Sync {
    fn resolve(
        &self,
        application: &ApplicationId,
        pool: &[Arc<CandidateModule>],
        requirements: &[Requirement],
    ) -> Result<Vec<Arc<CandidateModule>>>;
}

impl<R: CapabilityResolver + ?Sized> CapabilityResolver for Arc<R> {
    fn resolve(
        &self,
        application: &ApplicationId,
        pool: &[Arc<CandidateModule>],
        requirements: &[Requirement],
    ) -> Result<Vec<Arc<CandidateModule>>> {
        (**self).resolve(application, pool, requirements)
    }
}

/// One requirement nothing could satisfy, and who asked for it. `None`
/// means the requirement came straight from the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsatisfiedRequirement {
    pub requirement: Requirement,
    pub required_by: Option<ModuleId>,
}

impl fmt::Display for UnsatisfiedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.required_by {
            Some(module) => write!(f, "{} required by {}", self.requirement, module),
            None => write!(f, "{} required by the application", self.requirement),
        }
    }
}
