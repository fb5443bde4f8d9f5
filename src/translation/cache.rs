/*!
 * Persisted phrase translations.
 *
 * The online translations of both vocabularies are stored next to the output
 * document as `<output>.phrase-cache`, a JSON array `[src_dst, dst_src]`.
 * When the file exists no request is made. Entries read back from disk go
 * through the same trim-and-lowercase normalization as freshly fetched ones.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Suffix appended to the output path
pub const CACHE_SUFFIX: &str = ".phrase-cache";

type WordMap = HashMap<String, String>;

/// Word-level translations in both directions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(WordMap, WordMap)", into = "(WordMap, WordMap)")]
pub struct PhraseTables {
    /// Source word -> destination word
    pub source_to_target: WordMap,

    /// Destination word -> source word
    pub target_to_source: WordMap,
}

impl From<(WordMap, WordMap)> for PhraseTables {
    fn from((source_to_target, target_to_source): (WordMap, WordMap)) -> Self {
        Self {
            source_to_target,
            target_to_source,
        }
    }
}

impl From<PhraseTables> for (WordMap, WordMap) {
    fn from(tables: PhraseTables) -> Self {
        (tables.source_to_target, tables.target_to_source)
    }
}

/// Normalized form of a translated phrase; `None` when nothing is left
pub fn normalize_phrase(phrase: &str) -> Option<String> {
    let normalized = phrase.trim().to_lowercase();
    (!normalized.is_empty()).then_some(normalized)
}

fn normalize_map(map: WordMap) -> WordMap {
    map.into_iter()
        .filter_map(|(word, translation)| Some((normalize_phrase(&word)?, normalize_phrase(&translation)?)))
        .collect()
}

impl PhraseTables {
    /// Same tables with every key and value normalized, empty entries dropped
    pub fn normalized(self) -> Self {
        Self {
            source_to_target: normalize_map(self.source_to_target),
            target_to_source: normalize_map(self.target_to_source),
        }
    }

    pub fn len(&self) -> usize {
        self.source_to_target.len() + self.target_to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_to_target.is_empty() && self.target_to_source.is_empty()
    }
}

/// Cache-or-fetch access to the phrase cache file of one output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCache {
    path: PathBuf,
}

impl PhraseCache {
    /// Cache belonging to the output document at `output`
    pub fn for_output<P: AsRef<Path>>(output: P) -> Self {
        let mut path = OsString::from(output.as_ref().as_os_str());
        path.push(CACHE_SUFFIX);
        Self { path: PathBuf::from(path) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the cache if present
    pub fn load(&self) -> Result<Option<PhraseTables>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read phrase cache: {}", self.path.display()))?;
        let tables: PhraseTables = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse phrase cache: {}", self.path.display()))?;
        Ok(Some(tables.normalized()))
    }

    /// Write the cache, replacing any previous file atomically
    pub fn store(&self, tables: &PhraseTables) -> Result<()> {
        FileManager::ensure_parent_dir(&self.path)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        serde_json::to_writer(&mut file, tables).context("Failed to serialize phrase cache")?;
        file.flush()?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write phrase cache: {}", self.path.display()))?;

        debug!("Stored {} phrase translations in {}", tables.len(), self.path.display());
        Ok(())
    }

    /// Return the cached tables, or run `fetch` and persist its result
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<PhraseTables>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PhraseTables>>,
    {
        if let Some(tables) = self.load()? {
            info!("Loaded cached phrase translations from {}", self.path.display());
            return Ok(tables);
        }

        let tables = fetch().await?;
        self.store(&tables)?;
        Ok(tables)
    }
}
