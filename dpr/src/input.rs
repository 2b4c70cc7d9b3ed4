// dpr/src/input.rs
//! Application and repository files.
//!
//! An application file names the application, its content, optional use
//! hints and constraints, the modules it ships, and any service
//! requirements:
//!
//! ```json
//! {
//!   "application": { "name": "shop", "version": "1.0" },
//!   "content": [{ "name": "shop.web", "range": "[1.0.0,1.0.0]" }],
//!   "use": [{ "name": "shop.api", "range": "[1.0.0,2.0.0)" }],
//!   "constraints": [],
//!   "modules": [
//!     { "name": "shop.web", "version": "1.0.0",
//!       "exports": ["shop.web"],
//!       "requires": [{ "name": "shop.api.orders" }] }
//!   ],
//!   "import_services": { "import": ["orders"] }
//! }
//! ```
//!
//! A repository file is `{ "modules": [ ... ] }` with the same module shape.
use std::fs;
use std::path::Path;

use dpr_common::config::Config;
use dpr_common::dependency::{ExplicitHint, Requirement};
use dpr_common::error::{DprError, Result};
use dpr_common::model::{parse_version, ApplicationId, CandidateModule, ResolutionRequest, VersionRange};
use dpr_core::LocalCapabilityResolver;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ApplicationHeader {
    name: String,
    version: String,
}

/// A module named by the deployer; always a module-kind requirement.
#[derive(Debug, Deserialize)]
struct DeclaredModule {
    name: String,
    #[serde(default)]
    range: VersionRange,
}

#[derive(Debug, Deserialize)]
struct ApplicationFile {
    application: ApplicationHeader,
    content: Vec<DeclaredModule>,
    #[serde(default, rename = "use")]
    use_modules: Vec<DeclaredModule>,
    #[serde(default)]
    constraints: Vec<DeclaredModule>,
    #[serde(default)]
    modules: Vec<CandidateModule>,
    #[serde(default)]
    import_services: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryFile {
    #[serde(default)]
    modules: Vec<CandidateModule>,
}

fn read(path: &Path, what: &'static str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        DprError::Generic(format!("Failed to read {what} {}: {e}", path.display()))
    })
}

pub fn parse_application(text: &str) -> Result<ResolutionRequest> {
    let file: ApplicationFile = serde_json::from_str(text)
        .map_err(|e| DprError::ParseError("application file", e.to_string()))?;

    let version = parse_version(&file.application.version)?;
    let module = |declared: DeclaredModule| Requirement::module(declared.name, declared.range);

    Ok(
        ResolutionRequest::new(ApplicationId::new(file.application.name, version))
            .with_content(file.content.into_iter().map(module))
            .with_hints(
                file.use_modules
                    .into_iter()
                    .map(|declared| ExplicitHint::new(declared.name, declared.range)),
            )
            .with_constraints(file.constraints.into_iter().map(module))
            .with_local_candidates(file.modules)
            .with_service_requirements(file.import_services),
    )
}

pub fn load_application(path: &Path) -> Result<ResolutionRequest> {
    debug!("Loading application file {}", path.display());
    let request = parse_application(&read(path, "application file")?).map_err(|e| match e {
        DprError::ParseError(what, detail) => {
            DprError::ParseError(what, format!("{}: {detail}", path.display()))
        }
        other => other,
    })?;
    debug!(
        "Loaded {} with {} content module(s) and {} local module(s)",
        request.application,
        request.content.len(),
        request.local_candidates.len()
    );
    Ok(request)
}

pub fn parse_repository(text: &str) -> Result<Vec<CandidateModule>> {
    let file: RepositoryFile = serde_json::from_str(text)
        .map_err(|e| DprError::ParseError("repository file", e.to_string()))?;
    Ok(file.modules)
}

/// Loads the repository named on the command line, else the configured one.
/// A missing default repository is treated as empty.
pub fn load_repository(explicit: Option<&Path>, config: &Config) -> Result<LocalCapabilityResolver> {
    let modules = match explicit {
        Some(path) => parse_repository(&read(path, "repository file")?)?,
        None => {
            let path = config.repository_path();
            if path.exists() {
                parse_repository(&read(&path, "repository file")?)?
            } else {
                debug!(
                    "No repository at {}; resolving against local modules only",
                    path.display()
                );
                Vec::new()
            }
        }
    };
    debug!("Repository holds {} module(s)", modules.len());
    Ok(LocalCapabilityResolver::new(modules))
}
