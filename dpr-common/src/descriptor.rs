// dpr-common/src/descriptor.rs
use std::io::Write;

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dependency::Requirement;
use crate::error::Result;
use crate::model::ApplicationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedEntry {
    pub name: String,
    pub deployed_version: Version,
}

/// What a descriptor writer receives: the classified modules grouped by tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    pub application: ApplicationId,
    pub content: Vec<DeployedEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_bundle: Vec<DeployedEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provision: Vec<DeployedEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Requirement>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub service_requirements: Value,
}

/// Encodes a descriptor into the final deployment artifact.
pub trait DescriptorWriter {
    fn write(&self, descriptor: &DeploymentDescriptor, out: &mut dyn Write) -> Result<()>;
}
