// dpr-common/src/dependency/requirement.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CandidateModule, ModuleId, VersionRange};

/// What a requirement points at.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    /// A module by name: application content, use hints, constraints.
    Module,
    /// An exported capability by name, e.g. a package import.
    #[default]
    Capability,
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Capability => write!(f, "capability"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub kind: RequirementKind,
    #[serde(rename = "name")]
    pub target: String,
    #[serde(default)]
    pub range: VersionRange,
}

impl Requirement {
    pub fn module(name: impl Into<String>, range: VersionRange) -> Self {
        Self {
            kind: RequirementKind::Module,
            target: name.into(),
            range,
        }
    }

    pub fn capability(name: impl Into<String>, range: VersionRange) -> Self {
        Self {
            kind: RequirementKind::Capability,
            target: name.into(),
            range,
        }
    }

    /// A module requirement pinned to exactly `id`.
    pub fn exact_module(id: &ModuleId) -> Self {
        Self::module(id.name.clone(), VersionRange::exact(&id.version))
    }

    /// Name-and-range match against a module identity. Capability
    /// requirements never match an identity.
    pub fn matches_id(&self, id: &ModuleId) -> bool {
        self.kind == RequirementKind::Module
            && self.target == id.name
            && self.range.contains(&id.version)
    }

    pub fn is_satisfied_by(&self, module: &CandidateModule) -> bool {
        match self.kind {
            RequirementKind::Module => self.matches_id(&module.id),
            RequirementKind::Capability => {
                module.exports_capability(&self.target) && self.range.contains(module.version())
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.target)?;
        if self.range != VersionRange::any() {
            write!(f, " {}", self.range)?;
        }
        Ok(())
    }
}

/// A module the deployer explicitly wants considered during resolution,
/// separate from the application's own content. Modules it selects are
/// deployed as shared "use" modules when they turn out to be needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplicitHint(Requirement);

impl ExplicitHint {
    pub fn new(name: impl Into<String>, range: VersionRange) -> Self {
        Self(Requirement::module(name, range))
    }

    pub fn requirement(&self) -> &Requirement {
        &self.0
    }

    pub fn matches(&self, id: &ModuleId) -> bool {
        self.0.matches_id(id)
    }
}

impl From<ExplicitHint> for Requirement {
    fn from(hint: ExplicitHint) -> Self {
        hint.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_version;

    fn module(name: &str, version: &str, exports: &[&str]) -> CandidateModule {
        CandidateModule::new(ModuleId::new(name, parse_version(version).unwrap()))
            .with_exports(exports.iter().copied())
    }

    #[test]
    fn module_requirement_checks_name_and_range() {
        let req = Requirement::module("aries.test.c", "[1.0.0,1.1.0)".parse().unwrap());
        assert!(req.is_satisfied_by(&module("aries.test.c", "1.0.5", &[])));
        assert!(!req.is_satisfied_by(&module("aries.test.c", "1.1.0", &[])));
        assert!(!req.is_satisfied_by(&module("aries.test.d", "1.0.5", &[])));
    }

    #[test]
    fn capability_requirement_checks_exports() {
        let req = Requirement::capability("aries.test.e", VersionRange::any());
        assert!(req.is_satisfied_by(&module("provider", "1.0.0", &["aries.test.e"])));
        assert!(!req.is_satisfied_by(&module("aries.test.e", "1.0.0", &[])));
    }

    #[test]
    fn capability_never_matches_identity() {
        let req = Requirement::capability("a", VersionRange::any());
        assert!(!req.matches_id(&ModuleId::new("a", parse_version("1").unwrap())));
    }

    #[test]
    fn display_omits_open_range() {
        let req = Requirement::capability("pkg", VersionRange::any());
        assert_eq!(req.to_string(), "capability pkg");
        let pinned = Requirement::exact_module(&ModuleId::new("a", parse_version("1.0").unwrap()));
        assert_eq!(pinned.to_string(), "module a [1.0.0,1.0.0]");
    }

    #[test]
    fn hint_deserializes_from_plain_requirement() {
        let hint: ExplicitHint =
            serde_json::from_str(r#"{"kind":"module","name":"c","range":"[1.0.0,1.1.0)"}"#).unwrap();
        assert!(hint.matches(&ModuleId::new("c", parse_version("1.0.5").unwrap())));
    }
}
