// dpr-common/src/lib.rs
pub mod classification;
pub mod config;
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod model;

// Re-export key types
pub use classification::{Classification, ClassifiedModule, ClassifiedSet};
pub use config::Config;
pub use dependency::{CapabilityResolver, ExplicitHint, Requirement, RequirementKind};
pub use descriptor::{DeploymentDescriptor, DescriptorWriter};
pub use error::{DprError, Result};
pub use model::{ApplicationId, CandidateModule, ModuleId, ResolutionRequest, VersionRange};
