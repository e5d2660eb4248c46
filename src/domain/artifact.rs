//! Generated artifact model and generator-output text cleanup.

/// Commit message used when a structured generator reply cannot be parsed.
pub const FALLBACK_COMMIT_MESSAGE: &str = "Routine update to generated files";

/// One generated `(content, filename, commit message)` triple, consumed by
/// a single write+commit iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub content: String,
    pub filename: String,
    pub commit_message: String,
}

impl GeneratedArtifact {
    /// Safe default artifact: empty content, generic commit message. The
    /// caller supplies a collision-resolved generic filename.
    pub fn fallback(filename: String) -> Self {
        Self {
            content: String::new(),
            filename,
            commit_message: FALLBACK_COMMIT_MESSAGE.to_string(),
        }
    }
}

/// Strip code-block fences and stray backticks from generated text.
///
/// When the text carries a triple-backtick fence, only the first fenced
/// block is kept. A leading `python` language tag leaked by the generator
/// is dropped. Idempotent on text that is already fence-free.
pub fn strip_code_fences(generated: &str) -> String {
    let code = if generated.contains("```") {
        generated.split("```").nth(1).unwrap_or(generated)
    } else {
        generated
    };

    let code = code.replace('`', "");
    let mut code = code.trim();

    if code.get(..6).is_some_and(|tag| tag.eq_ignore_ascii_case("python")) {
        code = code[6..].trim();
    }

    code.to_string()
}

/// Cleanup for single-line generator output (labels, commit messages).
pub fn clean_generated_line(raw: &str) -> String {
    raw.replace('`', "").trim().to_string()
}
