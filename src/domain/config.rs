//! Bot configuration loading and validation.
//!
//! The config file is JSON with one `repositories` array. Raw entries are
//! deserialized into DTOs and converted into validated domain types up
//! front, so a malformed entry fails the run at load time instead of deep
//! inside the scheduling loop.

use std::path::Path;

use chrono::NaiveTime;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, CommitRange, CommitWindow, NamingConvention, RepositoryTask};

const TIME_FORMAT: &str = "%I:%M %p";

/// Validated bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub repositories: Vec<RepositoryTask>,
    pub generator: GeneratorSettings,
}

impl BotConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let dto: dto::BotConfigDto = serde_json::from_str(content)?;
        dto.try_into()
    }

    /// Find a repository task by name.
    pub fn repository(&self, name: &str) -> Result<&RepositoryTask, AppError> {
        self.repositories
            .iter()
            .find(|task| task.name == name)
            .ok_or_else(|| AppError::RepositoryNotInConfig(name.to_string()))
    }
}

/// How artifacts are requested from the content generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Three independent requests: code, filename, commit message.
    #[default]
    ThreeCall,
    /// One structured request carrying all three fields.
    SingleCall,
}

/// Content generator endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    #[serde(default = "default_model")]
    pub model: String,
    /// No timeout by default: a generation call blocks until the service
    /// responds or errors.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub strategy: Strategy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: None,
            strategy: Strategy::default(),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions")
        .expect("default endpoint URL is valid")
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| AppError::InvalidTime { field, value: value.to_string() })
}

mod dto {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct BotConfigDto {
        #[serde(default)]
        pub repositories: Vec<RepositoryTaskDto>,
        #[serde(default)]
        pub generator: Option<GeneratorSettings>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RepositoryTaskDto {
        pub name: String,
        pub repo_url: String,
        pub starting_time: String,
        pub ending_time: String,
        pub minimum_commits: u32,
        pub maximum_commits: u32,
        pub folders: Vec<String>,
        pub file_extension: String,
        pub file_naming_convention: String,
    }

    impl TryFrom<BotConfigDto> for BotConfig {
        type Error = AppError;

        fn try_from(dto: BotConfigDto) -> Result<Self, Self::Error> {
            if dto.repositories.is_empty() {
                return Err(AppError::config_error("No repositories found in config"));
            }
            let repositories = dto
                .repositories
                .into_iter()
                .map(RepositoryTask::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(BotConfig { repositories, generator: dto.generator.unwrap_or_default() })
        }
    }

    impl TryFrom<RepositoryTaskDto> for RepositoryTask {
        type Error = AppError;

        fn try_from(dto: RepositoryTaskDto) -> Result<Self, Self::Error> {
            let start = parse_time("starting_time", &dto.starting_time)?;
            let end = parse_time("ending_time", &dto.ending_time)?;

            if start > end {
                return Err(AppError::InvalidWindow {
                    repo: dto.name,
                    start: dto.starting_time,
                    end: dto.ending_time,
                });
            }

            if dto.minimum_commits > dto.maximum_commits {
                return Err(AppError::InvalidCommitRange {
                    repo: dto.name,
                    min: dto.minimum_commits,
                    max: dto.maximum_commits,
                });
            }

            if dto.folders.is_empty() {
                return Err(AppError::NoTargetFolders(dto.name));
            }

            Ok(RepositoryTask {
                name: dto.name,
                remote_url: dto.repo_url,
                window: CommitWindow { start, end },
                commits: CommitRange { min: dto.minimum_commits, max: dto.maximum_commits },
                folders: dto.folders,
                file_extension: dto.file_extension,
                naming: NamingConvention::parse(&dto.file_naming_convention),
            })
        }
    }
}
