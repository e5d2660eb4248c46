//! Version control port definition.

use crate::domain::AppError;

/// Port for repository acquisition and publishing.
///
/// Every operation is all-or-nothing: any failure is fatal to the running
/// task, with no retry or rollback.
pub trait RepositoryDriver {
    /// Make sure a working copy named `name` exists, cloning from `url` if
    /// absent. A no-op when the directory already exists.
    fn ensure_cloned(&self, name: &str, url: &str) -> Result<(), AppError>;

    /// Stage all changes in the working copy, commit with `message`, and
    /// push to the current branch on its same-named remote ref.
    fn commit_and_push(&self, name: &str, message: &str) -> Result<(), AppError>;
}
