/*!
 * Word-vector loading.
 *
 * Reads aligned fastText vectors in the text `.vec` format (a `<count> <dim>`
 * header line followed by `<word> <f1> ... <fdim>` lines), keeps only the words
 * of a vocabulary and unit-normalizes them so that a dot product is the
 * cosine similarity.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::captions::Vocabulary;
use crate::errors::ConfigurationError;

/// Partial map from lowercase surface form to a unit vector
#[derive(Debug, Clone, Default)]
pub struct EmbeddingMap {
    vectors: HashMap<String, Vec<f64>>,
}

impl EmbeddingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a vector as given; callers are responsible for normalization
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f64>) {
        self.vectors.insert(word.into(), vector);
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for EmbeddingMap {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().map(|(w, v)| (w.into(), v)).collect(),
        }
    }
}

/// Dot product of two vectors of the same dimension
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scale a vector to unit length; `None` for the zero vector
pub fn normalize(mut vector: Vec<f64>) -> Option<Vec<f64>> {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    for x in &mut vector {
        *x /= norm;
    }
    Some(vector)
}

/// Directory of `wiki.<lang>.align.vec` files
#[derive(Debug, Clone)]
pub struct WordVectorSource {
    dir: PathBuf,
}

impl WordVectorSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Expected vector file for a language
    pub fn path_for(&self, language: &str) -> PathBuf {
        self.dir.join(format!("wiki.{}.align.vec", language))
    }

    /// Resolve the vector file, failing if it is not there
    pub fn locate(&self, language: &str) -> Result<PathBuf, ConfigurationError> {
        let path = self.path_for(language);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ConfigurationError::MissingWordVectors {
                language: language.to_string(),
                path,
            })
        }
    }

    /// Load the vectors of every vocabulary word found in the language's file
    pub fn load(&self, language: &str, vocabulary: &Vocabulary) -> Result<EmbeddingMap> {
        let path = self.locate(language)?;
        info!("Loading \"{}\" word vectors", language);
        let embeddings = load_vec_file(&path, vocabulary)?;
        info!("Loaded {} (of {} requested)", embeddings.len(), vocabulary.len());
        Ok(embeddings)
    }
}

/// Load a `.vec` file, keeping only vocabulary words
pub fn load_vec_file(path: &Path, vocabulary: &Vocabulary) -> Result<EmbeddingMap> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open word vector file: {}", path.display()))?;
    read_vectors(BufReader::new(file), vocabulary)
        .with_context(|| format!("Failed to read word vector file: {}", path.display()))
}

/// Parse `.vec` content from any reader
pub fn read_vectors<R: BufRead>(reader: R, vocabulary: &Vocabulary) -> Result<EmbeddingMap> {
    let mut embeddings = EmbeddingMap::new();
    let mut dimension: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || i == 0 {
            continue;
        }

        let Some((word, data)) = line.split_once(' ') else {
            continue;
        };
        if !vocabulary.contains(word) {
            continue;
        }

        let values: Result<Vec<f64>, _> = data.split_whitespace().map(str::parse::<f64>).collect();
        let values = match values {
            Ok(values) => values,
            Err(e) => {
                debug!("Skipping malformed vector for '{}' at line {}: {}", word, i + 1, e);
                continue;
            }
        };

        match dimension {
            Some(dim) if dim != values.len() => {
                debug!("Skipping '{}': dimension {} instead of {}", word, values.len(), dim);
                continue;
            }
            None => dimension = Some(values.len()),
            _ => {}
        }

        if let Some(unit) = normalize(values) {
            embeddings.insert(word, unit);
        }
    }

    Ok(embeddings)
}
