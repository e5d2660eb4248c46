//! Repository task domain models.

use chrono::NaiveTime;
use rand::Rng;

/// Filename casing convention applied to generated names.
///
/// Unknown config strings map to `Fallback` so an unrecognized convention is
/// an explicit, handled case rather than a silent string mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    Snake,
    Camel,
    Kebab,
    Fallback,
}

impl NamingConvention {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "snake_case" => NamingConvention::Snake,
            "camelCase" => NamingConvention::Camel,
            "kebab-case" => NamingConvention::Kebab,
            _ => NamingConvention::Fallback,
        }
    }

    /// Config-facing spelling, used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingConvention::Snake => "snake_case",
            NamingConvention::Camel => "camelCase",
            NamingConvention::Kebab => "kebab-case",
            NamingConvention::Fallback => "lowercase",
        }
    }
}

/// Daily time-of-day interval during which commits are permitted.
///
/// Both bounds are inclusive; `start == end` is a valid single-instant
/// window. `start > end` is rejected at config load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl CommitWindow {
    pub fn contains(&self, now: NaiveTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// Whether the window has already closed for today.
    pub fn closed_for(&self, now: NaiveTime) -> bool {
        now > self.end
    }

    pub fn display(&self) -> String {
        format!("{} - {}", self.start.format("%I:%M %p"), self.end.format("%I:%M %p"))
    }
}

/// Inclusive bounds on the number of commits drawn for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRange {
    pub min: u32,
    pub max: u32,
}

impl CommitRange {
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// One target repository, read-only input for a scheduling session.
#[derive(Debug, Clone)]
pub struct RepositoryTask {
    /// Identifier, also the local working-directory name.
    pub name: String,
    /// Clone source.
    pub remote_url: String,
    pub window: CommitWindow,
    pub commits: CommitRange,
    /// Relative paths inside the repository; one is chosen per iteration.
    pub folders: Vec<String>,
    /// Appended verbatim to every generated filename, e.g. `.py`.
    pub file_extension: String,
    pub naming: NamingConvention,
}
