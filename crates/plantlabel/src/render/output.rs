//! Output file naming.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::PlantRecord;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Turn a plant name into a filesystem-safe file stem.
///
/// Drops anything that is not a word character, whitespace or hyphen,
/// joins the remaining words with `_` and trims stray underscores.
pub fn slugify(name: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(name, "");
    let joined = SEPARATORS.replace_all(&cleaned, "_");
    joined.trim_matches('_').to_string()
}

/// Hands out unique file stems within one batch.
///
/// Collisions are compared case-insensitively so `Fern` and `fern` do not
/// overwrite each other on case-insensitive filesystems.
#[derive(Debug, Default)]
pub struct OutputNamer {
    used: HashMap<String, usize>,
}

impl OutputNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// File stem for a record: its slug, `label_<row>` when the slug is
    /// empty, with `_2`, `_3`, ... appended on collision.
    pub fn name_for(&mut self, record: &PlantRecord) -> String {
        let mut base = slugify(&record.common_name);
        if base.is_empty() {
            base = format!("label_{}", record.row);
        }

        let mut candidate = base.clone();
        let mut n = 1;
        while self.used.contains_key(&candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{}_{}", base, n);
        }
        self.used.insert(candidate.to_lowercase(), record.row);
        candidate
    }
}
