//! Artifact production: prompt assembly, strategy dispatch, output cleanup.

use rand::Rng;
use serde::Deserialize;

use crate::domain::{
    AppError, FilenameRegistry, GeneratedArtifact, RepositoryTask, Strategy, clean_generated_line,
    normalize, strip_code_fences,
};
use crate::ports::ContentGenerator;

const GENERIC_BASE_NAME: &str = "file";

/// Orchestrates content-generation calls into one artifact per iteration.
pub struct ArtifactGenerator<'a, G> {
    client: &'a G,
    strategy: Strategy,
}

impl<'a, G: ContentGenerator> ArtifactGenerator<'a, G> {
    pub fn new(client: &'a G, strategy: Strategy) -> Self {
        Self { client, strategy }
    }

    /// Produce one artifact for `folder`, with a session-unique filename.
    ///
    /// Transport failures propagate and abort the task. A malformed
    /// structured reply is recovered locally with a fallback artifact.
    pub fn produce<R: Rng>(
        &self,
        task: &RepositoryTask,
        folder: &str,
        names: &mut FilenameRegistry,
        rng: &mut R,
    ) -> Result<GeneratedArtifact, AppError> {
        match self.strategy {
            Strategy::ThreeCall => self.produce_three_call(task, folder, names, rng),
            Strategy::SingleCall => self.produce_single_call(task, folder, names, rng),
        }
    }

    fn produce_three_call<R: Rng>(
        &self,
        task: &RepositoryTask,
        folder: &str,
        names: &mut FilenameRegistry,
        rng: &mut R,
    ) -> Result<GeneratedArtifact, AppError> {
        let code =
            strip_code_fences(&self.client.generate(&prompts::code(folder, &task.file_extension))?);

        let raw_label =
            clean_generated_line(&self.client.generate(&prompts::filename(&code, task))?);
        let filename =
            names.claim(normalize(&raw_label, task.naming, &task.file_extension), &task.file_extension, rng);

        let commit_message =
            clean_generated_line(&self.client.generate(&prompts::commit_message(&code))?);

        Ok(GeneratedArtifact { content: code, filename, commit_message })
    }

    fn produce_single_call<R: Rng>(
        &self,
        task: &RepositoryTask,
        folder: &str,
        names: &mut FilenameRegistry,
        rng: &mut R,
    ) -> Result<GeneratedArtifact, AppError> {
        let reply = self.client.generate(&prompts::structured(folder, task))?;

        let Some(parsed) = parse_structured(&reply) else {
            println!("Structured reply was malformed; falling back to a generic artifact.");
            let filename = names.claim(
                format!("{GENERIC_BASE_NAME}{}", task.file_extension),
                &task.file_extension,
                rng,
            );
            return Ok(GeneratedArtifact::fallback(filename));
        };

        let content = strip_code_fences(&parsed.code);

        // The reply already carries a convention-styled name; only clean it
        // and resolve collisions, without reapplying the convention.
        let mut base = clean_generated_line(&parsed.filename);
        base.retain(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.');
        if base.is_empty() {
            base = GENERIC_BASE_NAME.to_string();
        }
        let candidate = if base.ends_with(&task.file_extension) {
            base
        } else {
            format!("{base}{}", task.file_extension)
        };
        let filename = names.claim(candidate, &task.file_extension, rng);

        let commit_message = clean_generated_line(&parsed.commit_message);

        Ok(GeneratedArtifact { content, filename, commit_message })
    }
}

#[derive(Debug, Deserialize)]
struct StructuredReply {
    code: String,
    filename: String,
    commit_message: String,
}

fn parse_structured(reply: &str) -> Option<StructuredReply> {
    if let Ok(parsed) = serde_json::from_str(reply.trim()) {
        return Some(parsed);
    }
    // Tolerate a reply fenced as a ```json block.
    let stripped = strip_code_fences(reply);
    let body = stripped.strip_prefix("json").map(str::trim).unwrap_or(stripped.as_str());
    serde_json::from_str(body).ok()
}

mod prompts {
    use crate::domain::RepositoryTask;

    pub fn code(folder: &str, extension: &str) -> String {
        format!(
            "Generate a detailed, functional code snippet for a feature in the '{folder}' folder. \
             Output only code for a '{extension}' file with no comments or explanations. \
             Ensure it demonstrates some real logic or functionality."
        )
    }

    pub fn filename(code: &str, task: &RepositoryTask) -> String {
        format!(
            "You are given the following code snippet. Derive a short, standard file name (2-3 words) \
             that reflects what the code does. Avoid words like 'data', 'tool', 'process', 'manage', 'script'. \
             No disclaimers. The filename should be unique and relevant to the snippet's logic. \
             Output only the name, no punctuation or extra text.\n\n\
             Code snippet:\n{code}\n\n\
             Naming convention: {convention}. \
             Examples:\n\
             - snake_case -> mystic_orange, silent_forest\n\
             - camelCase -> mysticOrange, silentForest\n\
             - kebab-case -> mystic-orange, silent-forest\n\
             Return only the filename in the correct style.",
            convention = task.naming.as_str(),
        )
    }

    pub fn commit_message(code: &str) -> String {
        format!(
            "Analyze the following code snippet and create a unique, human-sounding Git commit message. \
             Avoid phrases like 'added' or 'implemented' at the start. \
             Keep it under 15 words, no disclaimers.\n\n{code}"
        )
    }

    pub fn structured(folder: &str, task: &RepositoryTask) -> String {
        format!(
            "Generate a functional code snippet for a feature in the '{folder}' folder, \
             suitable for a '{extension}' file, with no comments or explanations. \
             Respond with a single JSON object and nothing else, carrying exactly these fields: \
             \"code\" (the snippet), \
             \"filename\" (a short 2-3 word name in {convention} style, without the extension; \
             avoid words like 'data', 'tool', 'process', 'manage', 'script'), \
             \"commit_message\" (under 15 words, no disclaimers, \
             not starting with 'added' or 'implemented').",
            extension = task.file_extension,
            convention = task.naming.as_str(),
        )
    }
}
