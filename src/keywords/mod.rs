//! Crawler keyword configuration model
//!
//! The admin surface edits a JSON file of tracked keywords, one entry per
//! crawl source. The editor UI lives elsewhere; this module owns the
//! validated data model, save-time normalization, and the snapshot diff
//! that decides what actually changed between the loaded baseline and the
//! edited copy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DashError, Result};

fn default_enabled() -> bool {
    true
}

/// One tracked keyword, tagged by crawl source.
///
/// Variant-specific fields live in the variants; the `source` tag is
/// validated by serde at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum KeywordEntry {
    Reddit {
        keyword: String,
        subreddits: Vec<String>,
        #[serde(default)]
        min_upvotes: u32,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    Steam {
        keyword: String,
        app_id: u64,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
}

impl KeywordEntry {
    pub fn keyword(&self) -> &str {
        match self {
            KeywordEntry::Reddit { keyword, .. } => keyword,
            KeywordEntry::Steam { keyword, .. } => keyword,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            KeywordEntry::Reddit { .. } => "reddit",
            KeywordEntry::Steam { .. } => "steam",
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            KeywordEntry::Reddit { enabled, .. } => *enabled,
            KeywordEntry::Steam { enabled, .. } => *enabled,
        }
    }

    fn diff_key(&self) -> (&'static str, &str) {
        (self.source(), self.keyword())
    }
}

/// Boundary validation of a single entry
pub fn validate(entry: &KeywordEntry) -> Result<()> {
    if entry.keyword().trim().is_empty() {
        return Err(DashError::KeywordConfig(format!(
            "{} entry has an empty keyword",
            entry.source()
        )));
    }

    match entry {
        KeywordEntry::Reddit { keyword, subreddits, .. } => {
            if subreddits.iter().all(|s| s.trim().is_empty()) {
                return Err(DashError::KeywordConfig(format!(
                    "reddit keyword '{keyword}' has no subreddits"
                )));
            }
        }
        KeywordEntry::Steam { keyword, app_id, .. } => {
            if *app_id == 0 {
                return Err(DashError::KeywordConfig(format!(
                    "steam keyword '{keyword}' has app_id 0"
                )));
            }
        }
    }

    Ok(())
}

/// Parse and validate a JSON config document
pub fn parse_config(json: &str) -> Result<Vec<KeywordEntry>> {
    let entries: Vec<KeywordEntry> = serde_json::from_str(json)?;
    for entry in &entries {
        validate(entry)?;
    }
    Ok(entries)
}

/// Load and validate a config file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Vec<KeywordEntry>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| DashError::KeywordConfig(format!("read {}: {e}", path.display())))?;
    parse_config(&json)
}

/// Save-time normalization: trim the keyword, and for reddit entries drop
/// blank subreddits, then sort and dedupe the remainder.
///
/// Pure replacement for the legacy in-place `cleanForSave`.
pub fn clean_for_save(entry: &KeywordEntry) -> KeywordEntry {
    match entry {
        KeywordEntry::Reddit {
            keyword,
            subreddits,
            min_upvotes,
            enabled,
        } => {
            let mut subreddits: Vec<String> = subreddits
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            subreddits.sort();
            subreddits.dedup();

            KeywordEntry::Reddit {
                keyword: keyword.trim().to_string(),
                subreddits,
                min_upvotes: *min_upvotes,
                enabled: *enabled,
            }
        }
        KeywordEntry::Steam {
            keyword,
            app_id,
            enabled,
        } => KeywordEntry::Steam {
            keyword: keyword.trim().to_string(),
            app_id: *app_id,
            enabled: *enabled,
        },
    }
}

/// Result of comparing an edited config against its baseline snapshot
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeywordConfigDiff {
    pub added: Vec<KeywordEntry>,
    pub removed: Vec<KeywordEntry>,
    pub changed: Vec<KeywordEntry>,
}

impl KeywordConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare two immutable snapshots, keyed by (source, keyword).
///
/// Replaces the legacy per-item `isNew()` / `isEdited()` flags: ownership
/// of "original vs edited" is two snapshots, not mutable state on items.
pub fn diff(baseline: &[KeywordEntry], edited: &[KeywordEntry]) -> KeywordConfigDiff {
    let baseline_by_key: BTreeMap<_, _> =
        baseline.iter().map(|e| (e.diff_key(), e)).collect();
    let edited_by_key: BTreeMap<_, _> = edited.iter().map(|e| (e.diff_key(), e)).collect();

    let mut result = KeywordConfigDiff::default();

    for (key, entry) in &edited_by_key {
        match baseline_by_key.get(key) {
            None => result.added.push((*entry).clone()),
            Some(original) if original != entry => result.changed.push((*entry).clone()),
            Some(_) => {}
        }
    }

    for (key, entry) in &baseline_by_key {
        if !edited_by_key.contains_key(key) {
            result.removed.push((*entry).clone());
        }
    }

    result
}
