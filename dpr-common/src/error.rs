use std::sync::Arc;

use thiserror::Error;

use crate::dependency::{ResolutionFailure, UnsatisfiedRequirement};

#[derive(Error, Debug, Clone)]
pub enum DprError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Semantic Versioning Error: {0}")]
    SemVer(#[from] Arc<semver::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Parsing Error in {0}: {1}")]
    ParseError(&'static str, String),

    #[error(
        "Unable to resolve application {application}: {}",
        join_unsatisfied(.missing)
    )]
    UnsatisfiableRequirement {
        application: String,
        missing: Vec<UnsatisfiedRequirement>,
    },

    #[error("{0}")]
    IsolationConflict(ResolutionFailure),

    #[error("Resolution of {application} did not converge after {rounds} rounds")]
    NonConvergence { application: String, rounds: usize },

    #[error("No deployment content resolved for application {0}")]
    EmptyDeploymentContent(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

fn join_unsatisfied(missing: &[UnsatisfiedRequirement]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DprError {
    /// Self-contained display lines, one per underlying problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::IsolationConflict(failure) => failure.messages(),
            Self::UnsatisfiableRequirement { missing, .. } => {
                missing.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

impl From<std::io::Error> for DprError {
    fn from(err: std::io::Error) -> Self {
        DprError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for DprError {
    fn from(err: serde_json::Error) -> Self {
        DprError::Json(Arc::new(err))
    }
}

impl From<semver::Error> for DprError {
    fn from(err: semver::Error) -> Self {
        DprError::SemVer(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DprError>;
