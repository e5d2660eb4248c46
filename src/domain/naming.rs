//! Filename normalization and session-scoped collision tracking.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::NamingConvention;

/// Substitute base name when cleaning leaves nothing usable.
const EMPTY_BASE: &str = "file";

/// Random-suffix attempts before falling back to a counter-derived suffix.
const MAX_SUFFIX_ATTEMPTS: u32 = 100;

/// Convert a raw label into a filename obeying `convention`.
///
/// Total: any input, including one that cleans to nothing, yields a
/// non-empty base name with `extension` appended verbatim.
pub fn normalize(raw: &str, convention: NamingConvention, extension: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    let cased = match convention {
        NamingConvention::Snake => cleaned.replace('-', "_").to_lowercase(),
        NamingConvention::Camel => camel_case(&cleaned),
        NamingConvention::Kebab => cleaned.replace('_', "-").to_lowercase(),
        NamingConvention::Fallback => cleaned.to_lowercase(),
    };

    let base = if cased.is_empty() { EMPTY_BASE.to_string() } else { cased };
    format!("{base}{extension}")
}

fn camel_case(cleaned: &str) -> String {
    let joined = cleaned.replace('-', "_");
    let parts: Vec<&str> = joined.split('_').collect();
    if parts.len() > 1 {
        let mut out = parts[0].to_lowercase();
        for part in &parts[1..] {
            out.push_str(&capitalize(part));
        }
        out
    } else {
        lowercase_first(cleaned)
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Session-scoped set of claimed filenames.
///
/// Grows monotonically for the duration of one scheduling session; nothing
/// persists across runs.
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    used: HashSet<String>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `candidate`, mutating it with a random 3-digit suffix before
    /// the extension until it is unique within this session.
    ///
    /// Suffix attempts are capped; past the cap a counter-derived suffix is
    /// used, which terminates because the registry is finite.
    pub fn claim<R: Rng>(&mut self, candidate: String, extension: &str, rng: &mut R) -> String {
        if self.used.insert(candidate.clone()) {
            return candidate;
        }

        let stem = candidate.strip_suffix(extension).unwrap_or(&candidate).to_string();

        for _ in 0..MAX_SUFFIX_ATTEMPTS {
            let renamed = format!("{stem}{}{extension}", rng.gen_range(100..1000));
            if self.used.insert(renamed.clone()) {
                return renamed;
            }
        }

        let mut counter = self.used.len();
        loop {
            let renamed = format!("{stem}_{counter}{extension}");
            if self.used.insert(renamed.clone()) {
                return renamed;
            }
            counter += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
