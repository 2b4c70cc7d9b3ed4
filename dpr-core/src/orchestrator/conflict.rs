// dpr-core/src/orchestrator/conflict.rs
use std::collections::BTreeSet;

use dpr_common::dependency::ConflictRecord;
use dpr_common::model::ModuleId;
use tracing::debug;

use super::frontier::Frontier;

/// Finds every requirement of a shared module that the shared frontier
/// cannot satisfy on its own but one or more isolated modules can.
///
/// All shared modules and all of their requirements are examined; nothing
/// stops at the first hit.
pub fn find_conflicts(shared: &Frontier, isolated: &Frontier) -> Vec<ConflictRecord> {
    let mut records = Vec::new();

    for consumer in shared.modules() {
        for requirement in &consumer.requires {
            if shared.satisfies(requirement) {
                continue;
            }

            let providers: BTreeSet<ModuleId> = isolated
                .modules()
                .filter(|candidate| requirement.is_satisfied_by(candidate))
                .map(|candidate| candidate.id.clone())
                .collect();
            if providers.is_empty() {
                continue;
            }

            debug!(
                "Shared module '{}' needs '{}' from isolated module(s) {:?}",
                consumer.id, requirement.target, providers
            );
            records.push(ConflictRecord {
                consumer: consumer.id.clone(),
                missing_capability: requirement.target.clone(),
                isolated_providers: providers,
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dpr_common::dependency::Requirement;
    use dpr_common::model::{parse_version, CandidateModule, VersionRange};

    use super::*;

    fn module(name: &str, exports: &[&str], imports: &[&str]) -> Arc<CandidateModule> {
        Arc::new(
            CandidateModule::new(ModuleId::new(name, parse_version("1.0.0").unwrap()))
                .with_exports(exports.iter().copied())
                .with_requirements(
                    imports
                        .iter()
                        .map(|pkg| Requirement::capability(*pkg, VersionRange::any())),
                ),
        )
    }

    #[test]
    fn requirement_satisfied_inside_frontier_is_not_a_conflict() {
        let shared = Frontier::from_modules(vec![
            module("s1", &["p"], &["q"]),
            module("s2", &["q"], &[]),
        ]);
        let isolated = Frontier::from_modules(vec![module("iso", &["q"], &[])]);
        assert!(find_conflicts(&shared, &isolated).is_empty());
    }

    #[test]
    fn unrelated_isolated_module_is_not_blamed() {
        let shared = Frontier::from_modules(vec![module("s", &[], &["missing"])]);
        let isolated = Frontier::from_modules(vec![module("iso", &["other"], &[])]);
        assert!(find_conflicts(&shared, &isolated).is_empty());
    }

    #[test]
    fn collects_every_consumer_and_capability() {
        let shared = Frontier::from_modules(vec![
            module("s1", &[], &["a", "b"]),
            module("s2", &[], &["b"]),
        ]);
        let isolated = Frontier::from_modules(vec![
            module("i1", &["a", "b"], &[]),
            module("i2", &["b"], &[]),
        ]);

        let records = find_conflicts(&shared, &isolated);
        assert_eq!(records.len(), 3);
        let s1_b = records
            .iter()
            .find(|r| r.consumer.name == "s1" && r.missing_capability == "b")
            .unwrap();
        assert_eq!(s1_b.isolated_providers.len(), 2);
    }
}
