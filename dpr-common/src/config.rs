// dpr-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::error::{DprError, Result};

const DPR_HOME_DIRNAME: &str = ".dpr";
const DEFAULT_REPOSITORY_FILENAME: &str = "repository.json";
const MAX_DEFAULT_WORKERS: usize = 6;

#[derive(Debug, Clone)]
pub struct Config {
    pub dpr_home: PathBuf,
    /// Overrides the stability-probe bound derived from the request.
    pub max_rounds: Option<usize>,
    pub workers: usize,
    pub repository: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading dpr configuration");

        let dpr_home = match env::var("DPR_HOME").ok().filter(|s| !s.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => {
                let home = UserDirs::new()
                    .map_or_else(|| PathBuf::from("/"), |ud| ud.home_dir().to_path_buf())
                    .join(DPR_HOME_DIRNAME);
                debug!(
                    "DPR_HOME environment variable not set or empty, falling back to: {}",
                    home.display()
                );
                home
            }
        };

        let max_rounds = parse_positive_env("DPR_MAX_ROUNDS")?;
        let workers = parse_positive_env("DPR_WORKERS")?.unwrap_or_else(default_workers);
        let repository = env::var("DPR_REPOSITORY")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        debug!(
            "Configuration loaded: home={}, max_rounds={:?}, workers={}",
            dpr_home.display(),
            max_rounds,
            workers
        );
        Ok(Self {
            dpr_home,
            max_rounds,
            workers,
            repository,
        })
    }

    pub fn dpr_home(&self) -> &Path {
        &self.dpr_home
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dpr_home.join("logs")
    }

    /// Repository file the local resolver reads when none is given on the
    /// command line.
    pub fn repository_path(&self) -> PathBuf {
        self.repository
            .clone()
            .unwrap_or_else(|| self.dpr_home.join(DEFAULT_REPOSITORY_FILENAME))
    }
}

fn default_workers() -> usize {
    std::cmp::max(1, num_cpus::get_physical().saturating_sub(1)).min(MAX_DEFAULT_WORKERS)
}

fn parse_positive_env(key: &str) -> Result<Option<usize>> {
    match env::var(key).ok().filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => Err(DprError::Config(format!(
                "{key} must be a positive integer, got '{raw}'"
            ))),
            Ok(value) => Ok(Some(value)),
        },
    }
}

pub fn load_config() -> Result<Config> {
    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_env_values() {
        env::set_var("DPR_TEST_POSITIVE_OK", "4");
        assert_eq!(parse_positive_env("DPR_TEST_POSITIVE_OK").unwrap(), Some(4));

        env::set_var("DPR_TEST_POSITIVE_ZERO", "0");
        assert!(matches!(
            parse_positive_env("DPR_TEST_POSITIVE_ZERO"),
            Err(DprError::Config(_))
        ));

        env::set_var("DPR_TEST_POSITIVE_TEXT", "many");
        assert!(parse_positive_env("DPR_TEST_POSITIVE_TEXT").is_err());

        assert_eq!(parse_positive_env("DPR_TEST_POSITIVE_UNSET").unwrap(), None);
    }

    #[test]
    fn derived_paths_hang_off_home() {
        let config = Config {
            dpr_home: PathBuf::from("/srv/dpr"),
            max_rounds: None,
            workers: 1,
            repository: None,
        };
        assert_eq!(config.logs_dir(), PathBuf::from("/srv/dpr/logs"));
        assert_eq!(
            config.repository_path(),
            PathBuf::from("/srv/dpr/repository.json")
        );
    }
}
