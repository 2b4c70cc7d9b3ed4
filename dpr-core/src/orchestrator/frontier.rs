// dpr-core/src/orchestrator/frontier.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use dpr_common::dependency::Requirement;
use dpr_common::model::{CandidateModule, ModuleId, ResolutionRequest};

/// Immutable snapshot of a module set, keyed and compared by identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontier {
    modules: BTreeMap<ModuleId, Arc<CandidateModule>>,
}

impl Frontier {
    pub fn from_modules(modules: impl IntoIterator<Item = Arc<CandidateModule>>) -> Self {
        Self {
            modules: modules.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> + '_ {
        self.modules.keys()
    }

    pub fn modules(&self) -> impl Iterator<Item = &Arc<CandidateModule>> + '_ {
        self.modules.values()
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn same_identities(&self, other: &Frontier) -> bool {
        self.modules.len() == other.modules.len() && self.ids().all(|id| other.contains(id))
    }

    pub fn is_subset_of(&self, other: &Frontier) -> bool {
        self.ids().all(|id| other.contains(id))
    }

    /// Identities present here but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Frontier) -> Vec<&'a ModuleId> {
        self.ids().filter(|id| !other.contains(id)).collect()
    }

    /// Members of both frontiers; entries of `self` win on identical ids.
    pub fn union(&self, other: &Frontier) -> Frontier {
        let mut modules = other.modules.clone();
        modules.extend(self.modules.iter().map(|(id, m)| (id.clone(), m.clone())));
        Frontier { modules }
    }

    /// Whether any member alone satisfies `requirement`.
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        self.modules().any(|m| requirement.is_satisfied_by(m))
    }

    pub fn to_vec(&self) -> Vec<Arc<CandidateModule>> {
        self.modules.values().cloned().collect()
    }

    pub fn describe(&self) -> String {
        self.ids()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A resolver answer split into application content and everything else.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub content: Frontier,
    pub shared: Frontier,
}

pub fn partition(resolved: Vec<Arc<CandidateModule>>, request: &ResolutionRequest) -> Partition {
    let (content, shared): (Vec<_>, Vec<_>) = resolved
        .into_iter()
        .partition(|module| request.is_content(&module.id));
    Partition {
        content: Frontier::from_modules(content),
        shared: Frontier::from_modules(shared),
    }
}

#[cfg(test)]
mod tests {
    use dpr_common::model::{parse_version, ApplicationId, VersionRange};

    use super::*;

    fn module(name: &str, version: &str) -> Arc<CandidateModule> {
        Arc::new(CandidateModule::new(ModuleId::new(
            name,
            parse_version(version).unwrap(),
        )))
    }

    #[test]
    fn identity_comparison_ignores_insertion_order() {
        let a = Frontier::from_modules(vec![module("a", "1"), module("b", "1")]);
        let b = Frontier::from_modules(vec![module("b", "1"), module("a", "1")]);
        assert!(a.same_identities(&b));

        let smaller = Frontier::from_modules(vec![module("a", "1")]);
        assert!(!a.same_identities(&smaller));
        assert!(smaller.is_subset_of(&a));
        assert_eq!(a.difference(&smaller).len(), 1);
    }

    #[test]
    fn union_keeps_members_of_both_sides() {
        let old = Frontier::from_modules(vec![module("a", "1"), module("b", "1")]);
        let new = Frontier::from_modules(vec![module("b", "1"), module("c", "1")]);
        let both = old.union(&new);
        assert_eq!(both.len(), 3);
        assert!(old.is_subset_of(&both));
        assert!(new.is_subset_of(&both));
    }

    #[test]
    fn versions_are_part_of_identity() {
        let one = Frontier::from_modules(vec![module("a", "1.0.0")]);
        let two = Frontier::from_modules(vec![module("a", "2.0.0")]);
        assert!(!one.same_identities(&two));
    }

    #[test]
    fn partition_uses_declared_content_ranges() {
        let request = ResolutionRequest::new(ApplicationId::new(
            "app",
            parse_version("1.0").unwrap(),
        ))
        .with_content(vec![Requirement::module(
            "a",
            "[1.0.0,2.0.0)".parse::<VersionRange>().unwrap(),
        )]);

        let split = partition(
            vec![module("a", "1.5.0"), module("a", "2.0.0"), module("c", "1.0.0")],
            &request,
        );
        assert_eq!(split.content.describe(), "a_1.5.0");
        assert_eq!(split.shared.describe(), "a_2.0.0, c_1.0.0");
    }
}
