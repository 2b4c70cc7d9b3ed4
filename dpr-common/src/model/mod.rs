// dpr-common/src/model/mod.rs
// Declares the modules within the model directory.
pub mod module;
pub mod request;
pub mod version;

// Re-export
pub use module::{ApplicationId, CandidateModule, ModuleId};
pub use request::ResolutionRequest;
pub use version::{parse_version, VersionRange};
