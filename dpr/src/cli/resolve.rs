// dpr/src/cli/resolve.rs
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::RangedU64ValueParser;
use clap::Args;
use dpr_common::config::Config;
use dpr_common::descriptor::DescriptorWriter;
use dpr_common::error::{DprError, Result};
use dpr_core::{resolve_batch, ResolutionSettings};
use tracing::{debug, info};

use crate::input;
use crate::output::{self, JsonDescriptorWriter};

#[derive(Args, Debug)]
pub struct Resolve {
    /// Application files to resolve
    #[arg(required = true, value_name = "APP_JSON")]
    pub applications: Vec<PathBuf>,

    /// Repository file with shared modules (defaults to $DPR_HOME/repository.json)
    #[arg(long, short, value_name = "FILE")]
    pub repository: Option<PathBuf>,

    /// Print deployment descriptors as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Print each descriptor as a single JSON line (implies --json)
    #[arg(long)]
    pub compact: bool,

    /// Maximum stability probes per application
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_rounds: Option<usize>,

    /// Number of applications resolved in parallel
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub workers: Option<usize>,
}

impl Resolve {
    pub fn run(&self, config: &Config) -> Result<()> {
        let repository = input::load_repository(self.repository.as_deref(), config)?;
        let requests = self
            .applications
            .iter()
            .map(|path| input::load_application(path))
            .collect::<Result<Vec<_>>>()?;

        let settings = ResolutionSettings {
            max_rounds: self.max_rounds.or(config.max_rounds),
        };
        let workers = self.workers.unwrap_or(config.workers);
        debug!(
            "Resolving {} application(s) with {} worker(s), settings {:?}",
            requests.len(),
            workers,
            settings
        );

        let outcomes = resolve_batch(Arc::new(repository), requests, settings, workers);

        let json = self.json || self.compact;
        let writer = JsonDescriptorWriter {
            compact: self.compact,
        };
        let stdout = io::stdout();
        let mut failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(set) if json => writer.write(&set.descriptor(), &mut stdout.lock())?,
                Ok(set) => output::print_classified(set),
                Err(err) => {
                    failed += 1;
                    output::report_failure(&outcome.application, err);
                }
            }
        }

        if failed > 0 {
            return Err(DprError::Generic(format!(
                "{failed} of {} application(s) failed to resolve",
                outcomes.len()
            )));
        }
        info!("Resolved {} application(s)", outcomes.len());
        Ok(())
    }
}
