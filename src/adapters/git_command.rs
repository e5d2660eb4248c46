//! Git repository driver: subprocess git for clone/stage/commit/push,
//! git2 for branch introspection.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;

use crate::domain::AppError;
use crate::ports::RepositoryDriver;

/// Drives working copies living under a base directory, one subdirectory
/// per repository task.
#[derive(Debug, Clone)]
pub struct GitCommandDriver {
    base_dir: PathBuf,
}

impl GitCommandDriver {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn working_copy(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, AppError> {
        let mut command = Command::new("git");
        command.args(args);
        command.current_dir(cwd);

        let output = command.output().map_err(|e| AppError::GitError {
            command: format!("git {}", args.join(" ")),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::GitError {
                command: format!("git {}", args.join(" ")),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Name of the branch HEAD points at, handling unborn branches.
    fn current_branch(&self, workdir: &Path) -> Result<String, AppError> {
        let repo = Repository::open(workdir).map_err(|e| AppError::GitError {
            command: "git2::Repository::open".to_string(),
            details: e.to_string(),
        })?;

        match repo.head() {
            Ok(head) => {
                let shorthand = head.shorthand().ok_or_else(|| AppError::GitError {
                    command: "git2::Reference::shorthand".to_string(),
                    details: "HEAD has no shorthand".to_string(),
                })?;
                Ok(shorthand.to_string())
            }
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head_ref = repo.find_reference("HEAD").map_err(|e| AppError::GitError {
                    command: "git2::Repository::find_reference(HEAD)".to_string(),
                    details: e.to_string(),
                })?;

                if let Some(target) = head_ref.symbolic_target() {
                    Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
                } else {
                    Err(AppError::GitError {
                        command: "current_branch".to_string(),
                        details: "HEAD is detached and unborn".to_string(),
                    })
                }
            }
            Err(e) => Err(AppError::GitError {
                command: "git2::Repository::head".to_string(),
                details: e.to_string(),
            }),
        }
    }
}

impl RepositoryDriver for GitCommandDriver {
    fn ensure_cloned(&self, name: &str, url: &str) -> Result<(), AppError> {
        let workdir = self.working_copy(name);
        if workdir.exists() {
            println!("Repository {} already exists.", name);
            return Ok(());
        }

        println!("Cloning repository {}...", name);
        std::fs::create_dir_all(&self.base_dir)?;
        self.run(&["clone", url, name], &self.base_dir)?;
        Ok(())
    }

    fn commit_and_push(&self, name: &str, message: &str) -> Result<(), AppError> {
        let workdir = self.working_copy(name);

        self.run(&["add", "."], &workdir)?;
        self.run(&["commit", "-m", message], &workdir)?;

        let branch = self.current_branch(&workdir)?;
        self.run(&["push", "origin", &branch], &workdir)?;
        Ok(())
    }
}
