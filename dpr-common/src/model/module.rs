// dpr-common/src/model/module.rs
use std::collections::BTreeSet;
use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::dependency::Requirement;

/// Identity of a resolvable module. Ordered by name, then version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub name: String,
    pub version: Version,
}

impl ModuleId {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.version)
    }
}

/// The application a resolution is performed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId {
    pub name: String,
    pub version: Version,
}

impl ApplicationId {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.version)
    }
}

/// A module known to a capability resolver: what it is, what it exports and
/// what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateModule {
    #[serde(flatten)]
    pub id: ModuleId,
    #[serde(default)]
    pub exports: BTreeSet<String>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

impl CandidateModule {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            exports: BTreeSet::new(),
            requires: Vec::new(),
        }
    }

    pub fn with_exports<I, S>(mut self, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports.extend(exports.into_iter().map(Into::into));
        self
    }

    pub fn with_requirements<I>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = Requirement>,
    {
        self.requires.extend(requires);
        self
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn version(&self) -> &Version {
        &self.id.version
    }

    pub fn exports_capability(&self, capability: &str) -> bool {
        self.exports.contains(capability)
    }
}
