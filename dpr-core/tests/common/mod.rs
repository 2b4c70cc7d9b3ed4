//! Shared fixtures for dpr-core integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dpr_common::dependency::{CapabilityResolver, ExplicitHint, Requirement};
use dpr_common::error::Result;
use dpr_common::model::{
    parse_version, ApplicationId, CandidateModule, ModuleId, ResolutionRequest, VersionRange,
};

pub fn id(name: &str, version: &str) -> ModuleId {
    ModuleId::new(name, parse_version(version).expect("valid version"))
}

pub fn module(name: &str, version: &str) -> CandidateModule {
    CandidateModule::new(id(name, version))
}

pub fn cap(name: &str) -> Requirement {
    Requirement::capability(name, VersionRange::any())
}

pub fn range(text: &str) -> VersionRange {
    text.parse().expect("valid range")
}

pub fn exact(name: &str, version: &str) -> Requirement {
    Requirement::exact_module(&id(name, version))
}

pub fn hint(name: &str, text: &str) -> ExplicitHint {
    ExplicitHint::new(name, range(text))
}

pub fn request(name: &str) -> ResolutionRequest {
    ResolutionRequest::new(ApplicationId::new(name, parse_version("1.0").expect("valid version")))
}

/// Replays canned answers in order and records what it was asked.
pub struct ScriptedResolver {
    answers: Mutex<VecDeque<Result<Vec<CandidateModule>>>>,
    pub calls: Mutex<Vec<(Vec<ModuleId>, Vec<Requirement>)>>,
}

impl ScriptedResolver {
    pub fn new(answers: Vec<Result<Vec<CandidateModule>>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CapabilityResolver for ScriptedResolver {
    fn resolve(
        &self,
        _application: &ApplicationId,
        pool: &[Arc<CandidateModule>],
        requirements: &[Requirement],
    ) -> Result<Vec<Arc<CandidateModule>>> {
        self.calls.lock().unwrap().push((
            pool.iter().map(|m| m.id.clone()).collect(),
            requirements.to_vec(),
        ));
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("resolver called more often than scripted");
        answer.map(|modules| modules.into_iter().map(Arc::new).collect())
    }
}

/// Answers every call with a shared module it has never returned before,
/// so the shared frontier never settles. Only the first answer carries the
/// content.
pub struct DriftingResolver {
    content: CandidateModule,
    capability: String,
    calls: AtomicUsize,
}

impl DriftingResolver {
    pub fn new(content: CandidateModule, capability: &str) -> Self {
        Self {
            content,
            capability: capability.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CapabilityResolver for DriftingResolver {
    fn resolve(
        &self,
        _application: &ApplicationId,
        _pool: &[Arc<CandidateModule>],
        _requirements: &[Requirement],
    ) -> Result<Vec<Arc<CandidateModule>>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let drifting = module(&format!("drift{n}"), "1.0.0").with_exports([self.capability.clone()]);
        if n == 0 {
            Ok(vec![Arc::new(self.content.clone()), Arc::new(drifting)])
        } else {
            Ok(vec![Arc::new(drifting)])
        }
    }
}
