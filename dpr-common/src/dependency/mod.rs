// dpr-common/src/dependency/mod.rs
pub mod conflict;
pub mod requirement;
pub mod resolver;

pub use conflict::{ConflictRecord, ResolutionFailure};
pub use requirement::{ExplicitHint, Requirement, RequirementKind};
pub use resolver::{CapabilityResolver, UnsatisfiedRequirement};
