//! Content generation port definition.

use crate::domain::AppError;

/// Port for the external content-generation service.
///
/// One request, one response; latency is unbounded and no retry policy is
/// implied here. Transport failures are fatal to the calling task.
pub trait ContentGenerator {
    /// Send `prompt` and return the generated text.
    fn generate(&self, prompt: &str) -> Result<String, AppError>;
}
