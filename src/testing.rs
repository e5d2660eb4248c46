//! Shared test doubles for the scheduler seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use chrono::{Duration as TimeStep, NaiveTime};

use crate::domain::AppError;
use crate::ports::{Clock, ContentGenerator, RepositoryDriver};

/// Clock with a settable time-of-day that records every sleep.
pub struct FakeClock {
    now: Cell<NaiveTime>,
    step: Cell<TimeStep>,
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeClock {
    pub fn at(now: NaiveTime) -> Self {
        Self {
            now: Cell::new(now),
            step: Cell::new(TimeStep::zero()),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Advance the reported time-of-day by `step` on every sleep.
    pub fn advance_per_sleep(&self, step: TimeStep) {
        self.step.set(step);
    }

    pub fn set_time(&self, now: NaiveTime) {
        self.now.set(now);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for FakeClock {
    fn time_of_day(&self) -> NaiveTime {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.now.set(self.now.get() + self.step.get());
    }
}

/// Generator replaying a fixed queue of responses.
pub struct ScriptedGenerator {
    responses: RefCell<VecDeque<Result<String, AppError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, AppError>>) -> Self {
        Self { responses: RefCell::new(responses.into()), prompts: RefCell::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ContentGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(AppError::GeneratorError {
                message: "scripted generator exhausted".to_string(),
                status: None,
            })
        })
    }
}

/// Generator answering every request with the same text.
pub struct RepeatingGenerator {
    text: String,
    prompts: RefCell<Vec<String>>,
}

impl RepeatingGenerator {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string(), prompts: RefCell::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ContentGenerator for RepeatingGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.text.clone())
    }
}

/// Repository driver that records operations instead of touching git.
#[derive(Default)]
pub struct RecordingRepository {
    pub clones: RefCell<Vec<(String, String)>>,
    pub commits: RefCell<Vec<String>>,
    /// Fail `commit_and_push` once this many commits have been recorded.
    pub fail_after: Option<usize>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(commits: usize) -> Self {
        Self { fail_after: Some(commits), ..Self::default() }
    }
}

impl RepositoryDriver for RecordingRepository {
    fn ensure_cloned(&self, name: &str, url: &str) -> Result<(), AppError> {
        self.clones.borrow_mut().push((name.to_string(), url.to_string()));
        Ok(())
    }

    fn commit_and_push(&self, _name: &str, message: &str) -> Result<(), AppError> {
        if let Some(limit) = self.fail_after {
            if self.commits.borrow().len() >= limit {
                return Err(AppError::GitError {
                    command: "git push origin main".to_string(),
                    details: "remote rejected".to_string(),
                });
            }
        }
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }
}
