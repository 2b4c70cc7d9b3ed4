// dpr-core/src/lib.rs
pub mod batch;
pub mod local;
pub mod orchestrator;

pub use batch::{resolve_batch, BatchOutcome};
pub use local::LocalCapabilityResolver;
pub use orchestrator::{resolve_deployment, DeploymentResolver, ResolutionSettings};
