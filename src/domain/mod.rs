pub mod artifact;
pub mod config;
pub mod error;
pub mod naming;
pub mod task;

pub use artifact::{FALLBACK_COMMIT_MESSAGE, GeneratedArtifact, clean_generated_line, strip_code_fences};
pub use config::{BotConfig, GeneratorSettings, Strategy};
pub use error::AppError;
pub use naming::{FilenameRegistry, normalize};
pub use task::{CommitRange, CommitWindow, NamingConvention, RepositoryTask};
