//! cadence: drive a repository toward a randomized daily commit cadence
//! with content from an external generation service.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use adapters::{GitCommandDriver, HttpContentGenerator, SystemClock};
use app::CommitScheduler;

pub use app::{SessionOutcome, WindowOutcome};
pub use domain::{AppError, BotConfig, GeneratedArtifact, RepositoryTask, Strategy};

/// Options for a scheduling run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the JSON config file.
    pub config: PathBuf,
    /// Repository task to run; a random config entry when absent.
    pub repo: Option<String>,
    /// Directory holding working copies; the current directory when absent.
    pub base_dir: Option<PathBuf>,
}

/// Load and validate the config at `path`.
pub fn validate(path: &Path) -> Result<BotConfig, AppError> {
    BotConfig::load(path)
}

/// Run one scheduling session over one repository task.
///
/// Requires `OPENAI_API_KEY` in the environment. Blocks until the session
/// terminates: window missed, commit count exhausted, or a fatal error.
pub fn run(options: RunOptions) -> Result<SessionOutcome, AppError> {
    let config = BotConfig::load(&options.config)?;

    let task = match &options.repo {
        Some(name) => config.repository(name)?.clone(),
        None => config
            .repositories
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AppError::config_error("No repositories found in config"))?,
    };

    let base_dir = match options.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let client = HttpContentGenerator::from_env(&config.generator)?;
    let repo = GitCommandDriver::new(base_dir.clone());
    let clock = SystemClock;

    let scheduler =
        CommitScheduler::new(&client, config.generator.strategy, &repo, &clock, base_dir);
    scheduler.run(&task)
}
