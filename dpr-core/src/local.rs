// dpr-core/src/local.rs
//! In-memory reference capability resolver.
//!
//! Selection is greedy: each requirement is answered by a module already
//! selected in this call if one fits, otherwise by the highest satisfying
//! version in the pool, otherwise by the highest satisfying version in the
//! repository. Requirements of newly selected modules are queued
//! breadth-first. Every requirement left unanswered is reported together.
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use dpr_common::dependency::{CapabilityResolver, Requirement, UnsatisfiedRequirement};
use dpr_common::error::{DprError, Result};
use dpr_common::model::{ApplicationId, CandidateModule, ModuleId};
use tracing::{debug, instrument, trace, warn};

#[derive(Debug, Clone, Default)]
pub struct LocalCapabilityResolver {
    repository: Vec<Arc<CandidateModule>>,
}

impl LocalCapabilityResolver {
    pub fn new(repository: impl IntoIterator<Item = CandidateModule>) -> Self {
        Self {
            repository: repository.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(repository: Vec<Arc<CandidateModule>>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &[Arc<CandidateModule>] {
        &self.repository
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }
}

fn highest_satisfying<'m>(
    requirement: &Requirement,
    modules: &'m [Arc<CandidateModule>],
) -> Option<&'m Arc<CandidateModule>> {
    modules
        .iter()
        .filter(|module| requirement.is_satisfied_by(module))
        .max_by(|a, b| a.version().cmp(b.version()))
}

impl CapabilityResolver for LocalCapabilityResolver {
    #[instrument(skip_all, fields(application = %application))]
    fn resolve(
        &self,
        application: &ApplicationId,
        pool: &[Arc<CandidateModule>],
        requirements: &[Requirement],
    ) -> Result<Vec<Arc<CandidateModule>>> {
        let mut selected: BTreeMap<ModuleId, Arc<CandidateModule>> = BTreeMap::new();
        let mut missing: Vec<UnsatisfiedRequirement> = Vec::new();
        let mut queue: VecDeque<(Requirement, Option<ModuleId>)> = requirements
            .iter()
            .map(|requirement| (requirement.clone(), None))
            .collect();

        debug!(
            "Resolving {} requirement(s) against {} pooled and {} repository module(s)",
            requirements.len(),
            pool.len(),
            self.repository.len()
        );

        while let Some((requirement, required_by)) = queue.pop_front() {
            if selected.values().any(|module| requirement.is_satisfied_by(module)) {
                continue;
            }

            let Some(choice) = highest_satisfying(&requirement, pool)
                .or_else(|| highest_satisfying(&requirement, &self.repository))
            else {
                let unsatisfied = UnsatisfiedRequirement {
                    requirement,
                    required_by,
                };
                if !missing.contains(&unsatisfied) {
                    warn!("No module satisfies {}", unsatisfied);
                    missing.push(unsatisfied);
                }
                continue;
            };

            trace!("Selected {} for {}", choice.id, requirement);
            queue.extend(
                choice
                    .requires
                    .iter()
                    .map(|next| (next.clone(), Some(choice.id.clone()))),
            );
            selected.insert(choice.id.clone(), Arc::clone(choice));
        }

        if !missing.is_empty() {
            return Err(DprError::UnsatisfiableRequirement {
                application: application.to_string(),
                missing,
            });
        }
        Ok(selected.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use dpr_common::model::{parse_version, VersionRange};

    use super::*;

    fn app() -> ApplicationId {
        ApplicationId::new("app", parse_version("1.0").unwrap())
    }

    fn module(name: &str, version: &str) -> CandidateModule {
        CandidateModule::new(ModuleId::new(name, parse_version(version).unwrap()))
    }

    fn names(resolved: &[Arc<CandidateModule>]) -> Vec<String> {
        resolved.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn picks_highest_version_in_range() {
        let resolver = LocalCapabilityResolver::new(vec![
            module("c", "1.0.0"),
            module("c", "1.0.5"),
            module("c", "1.1.0"),
        ]);
        let resolved = resolver
            .resolve(
                &app(),
                &[],
                &[Requirement::module("c", "[1.0.0,1.1.0)".parse().unwrap())],
            )
            .unwrap();
        assert_eq!(names(&resolved), vec!["c_1.0.5"]);
    }

    #[test]
    fn pool_wins_over_repository() {
        let resolver = LocalCapabilityResolver::new(vec![module("p", "2.0.0").with_exports(["pkg"])]);
        let pool = vec![Arc::new(module("local", "1.0.0").with_exports(["pkg"]))];
        let resolved = resolver
            .resolve(
                &app(),
                &pool,
                &[Requirement::capability("pkg", VersionRange::any())],
            )
            .unwrap();
        assert_eq!(names(&resolved), vec!["local_1.0.0"]);
    }

    #[test]
    fn follows_transitive_requirements_once() {
        let resolver = LocalCapabilityResolver::new(vec![
            module("a", "1.0.0")
                .with_requirements([Requirement::capability("b.api", VersionRange::any())]),
            module("b", "1.0.0")
                .with_exports(["b.api"])
                .with_requirements([Requirement::capability("a.api", VersionRange::any())]),
            module("a-api", "1.0.0").with_exports(["a.api"]),
        ]);
        let resolved = resolver
            .resolve(
                &app(),
                &[],
                &[Requirement::module("a", VersionRange::any())],
            )
            .unwrap();
        assert_eq!(names(&resolved), vec!["a_1.0.0", "a-api_1.0.0", "b_1.0.0"]);
    }

    #[test]
    fn reports_every_unsatisfied_requirement() {
        let resolver = LocalCapabilityResolver::new(vec![module("a", "1.0.0")
            .with_requirements([Requirement::capability("gone", VersionRange::any())])]);
        let err = resolver
            .resolve(
                &app(),
                &[],
                &[
                    Requirement::module("a", VersionRange::any()),
                    Requirement::module("missing", VersionRange::any()),
                ],
            )
            .unwrap_err();

        match err {
            DprError::UnsatisfiableRequirement { application, missing } => {
                assert_eq!(application, "app_1.0.0");
                let lines: Vec<String> = missing.iter().map(ToString::to_string).collect();
                assert_eq!(
                    lines,
                    vec![
                        "module missing required by the application",
                        "capability gone required by a_1.0.0",
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_requirements_resolves_nothing() {
        let resolver = LocalCapabilityResolver::new(vec![module("a", "1.0.0")]);
        assert!(resolver.resolve(&app(), &[], &[]).unwrap().is_empty());
    }
}
