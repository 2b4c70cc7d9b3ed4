// dpr-core/src/orchestrator/classify.rs
use dpr_common::classification::{Classification, ClassifiedModule, ClassifiedSet};
use dpr_common::dependency::Requirement;
use dpr_common::model::ResolutionRequest;

use super::frontier::Frontier;

/// Requirements of the content that no content module satisfies, in the
/// order the content declares them.
pub fn external_requirements(content: &Frontier) -> Vec<Requirement> {
    let mut external: Vec<Requirement> = Vec::new();
    for module in content.modules() {
        for requirement in &module.requires {
            if content.satisfies(requirement) || external.contains(requirement) {
                continue;
            }
            external.push(requirement.clone());
        }
    }
    external
}

/// Tags the content and the stable shared frontier. Shared modules the
/// deployer hinted at become `Use`; the rest are `Provision`.
pub fn classify(
    request: &ResolutionRequest,
    content: &Frontier,
    shared: &Frontier,
    imports: Vec<Requirement>,
    rounds: usize,
) -> ClassifiedSet {
    let content_modules = content.modules().map(|module| ClassifiedModule {
        module: module.clone(),
        classification: Classification::Content,
    });
    let shared_modules = shared.modules().map(|module| ClassifiedModule {
        module: module.clone(),
        classification: if request.is_hinted(&module.id) {
            Classification::Use
        } else {
            Classification::Provision
        },
    });

    ClassifiedSet::new(
        request.application.clone(),
        content_modules.chain(shared_modules).collect(),
        imports,
        request.service_requirements.clone(),
        rounds,
    )
}
