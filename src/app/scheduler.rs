//! Commit scheduling state machine.
//!
//! One session drives one repository task: wait for the window, draw a
//! commit count, then loop generate → write → commit → push with a
//! randomized pause between iterations until the count is exhausted or the
//! window closes.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::app::generator::ArtifactGenerator;
use crate::app::window::{WindowOutcome, await_window};
use crate::domain::{AppError, FilenameRegistry, RepositoryTask, Strategy};
use crate::ports::{Clock, ContentGenerator, RepositoryDriver};

/// Inclusive bounds, in seconds, of the randomized pause between commits.
pub const PACING_SECS: RangeInclusive<u64> = 300..=900;

/// How one scheduling session ended. Early window termination is a clean
/// stop, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The drawn commit count was fully delivered.
    Completed { commits: u32 },
    /// The window had already closed before any commit was attempted.
    WindowMissed,
    /// The window closed mid-session; partial completion is expected.
    WindowClosed { completed: u32 },
}

/// Orchestrates one task through its session lifecycle.
pub struct CommitScheduler<'a, G, R, C> {
    generator: ArtifactGenerator<'a, G>,
    repo: &'a R,
    clock: &'a C,
    /// Directory holding working copies, one subdirectory per task.
    base_dir: PathBuf,
}

impl<'a, G, R, C> CommitScheduler<'a, G, R, C>
where
    G: ContentGenerator,
    R: RepositoryDriver,
    C: Clock,
{
    pub fn new(
        client: &'a G,
        strategy: Strategy,
        repo: &'a R,
        clock: &'a C,
        base_dir: PathBuf,
    ) -> Self {
        Self { generator: ArtifactGenerator::new(client, strategy), repo, clock, base_dir }
    }

    /// Run one session over `task`.
    ///
    /// Generator transport failures and VCS failures are fatal: they
    /// propagate immediately, leaving any half-written file in place.
    pub fn run(&self, task: &RepositoryTask) -> Result<SessionOutcome, AppError> {
        self.repo.ensure_cloned(&task.name, &task.remote_url)?;

        if await_window(&task.window, self.clock) == WindowOutcome::MissedClosed {
            return Ok(SessionOutcome::WindowMissed);
        }

        let mut rng = rand::thread_rng();
        let target = task.commits.draw(&mut rng);
        println!("Planning {} commit(s) for {}.", target, task.name);

        let mut names = FilenameRegistry::new();
        let mut completed = 0u32;

        while completed < target {
            // Each iteration can take arbitrarily long waiting on the
            // generator, so the window boundary is enforced again here.
            if task.window.closed_for(self.clock.time_of_day()) {
                println!(
                    "Reached the window end ({}). Stopping after {} commit(s).",
                    task.window.display(),
                    completed
                );
                return Ok(SessionOutcome::WindowClosed { completed });
            }

            let folder = task
                .folders
                .choose(&mut rng)
                .ok_or_else(|| AppError::NoTargetFolders(task.name.clone()))?;
            let directory = self.base_dir.join(&task.name).join(folder);
            std::fs::create_dir_all(&directory)?;

            let artifact = self.generator.produce(task, folder, &mut names, &mut rng)?;
            std::fs::write(directory.join(&artifact.filename), &artifact.content)?;
            println!("Wrote {}/{}.", folder, artifact.filename);

            self.repo.commit_and_push(&task.name, &artifact.commit_message)?;
            println!("Committed and pushed: {}", artifact.commit_message);

            completed += 1;
            if completed < target {
                let pause = rng.gen_range(PACING_SECS);
                println!("Sleeping {}s before the next commit...", pause);
                self.clock.sleep(Duration::from_secs(pause));
            }
        }

        println!("Finished {} commit(s) for {}.", completed, task.name);
        Ok(SessionOutcome::Completed { commits: completed })
    }
}
