pub mod generator;
pub mod scheduler;
pub mod window;

pub use generator::ArtifactGenerator;
pub use scheduler::{CommitScheduler, SessionOutcome};
pub use window::{WindowOutcome, await_window};
