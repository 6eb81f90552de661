//! Index Store: building, persisting, and freshness-checking the embedding
//! index.
//!
//! The index is a single opaque bincode artifact holding every composed
//! document, its embedding, and the identity of the model that produced
//! them. There is no partial or incremental state — a stale or absent
//! artifact means a whole-corpus rebuild. Freshness is a modification-time
//! heuristic against the corpus file: touching the corpus without changing
//! content forces an unnecessary rebuild, which is an accepted tradeoff.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

use crate::error::Error;
use crate::models::Document;

/// A composed document with its attached embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// The persisted index snapshot.
///
/// Invariant: every embedding has length `dims` and was produced by the
/// model named in `model_name`. `dims` doubles as the model fingerprint
/// checked at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub model_name: String,
    pub dims: usize,
    pub documents: Vec<IndexedDocument>,
}

/// Zip documents and embeddings in order into an [`Index`].
pub fn build(
    documents: Vec<Document>,
    embeddings: Vec<Vec<f32>>,
    model_name: &str,
) -> Result<Index> {
    if documents.len() != embeddings.len() {
        anyhow::bail!(
            "document/embedding count mismatch: {} documents, {} embeddings",
            documents.len(),
            embeddings.len()
        );
    }

    let dims = embeddings.first().map(Vec::len).unwrap_or(0);
    for (document, embedding) in documents.iter().zip(&embeddings) {
        if embedding.len() != dims {
            anyhow::bail!(
                "inconsistent embedding dimensionality for {}: expected {}, got {}",
                document.identifier,
                dims,
                embedding.len()
            );
        }
    }

    let documents = documents
        .into_iter()
        .zip(embeddings)
        .map(|(document, embedding)| IndexedDocument {
            document,
            embedding,
        })
        .collect();

    Ok(Index {
        model_name: model_name.to_string(),
        dims,
        documents,
    })
}

/// Serialize the index to `path`.
///
/// Writes to a temporary file in the same directory and renames it into
/// place, so a reader never observes a partially written artifact.
pub fn save(index: &Index, path: &Path) -> Result<()> {
    let bytes = bincode::serialize(index).context("Failed to serialize index")?;

    let tmp = path.with_extension("index.tmp");
    std::fs::write(&tmp, &bytes)
        .with_context(|| format!("Failed to write index to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move index into place at {}", path.display()))?;

    Ok(())
}

/// Deserialize the index from `path`.
pub fn load(path: &Path) -> Result<Index> {
    if !path.exists() {
        return Err(Error::MissingIndex {
            path: path.to_path_buf(),
        }
        .into());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read index: {}", path.display()))?;

    bincode::deserialize(&bytes)
        .with_context(|| format!("Failed to decode index: {}", path.display()))
}

/// True when the index at `index_path` must be rebuilt: it does not exist,
/// or its modification time is not strictly newer than the corpus's.
pub fn is_stale(source_path: &Path, index_path: &Path) -> Result<bool> {
    if !source_path.exists() {
        return Err(Error::MissingSource {
            path: source_path.to_path_buf(),
        }
        .into());
    }

    let source_mtime = std::fs::metadata(source_path)?.modified()?;
    let index_mtime = match std::fs::metadata(index_path) {
        Ok(meta) => Some(meta.modified()?),
        Err(_) => None,
    };

    Ok(is_stale_times(source_mtime, index_mtime))
}

/// Pure mtime comparison behind [`is_stale`].
pub fn is_stale_times(source: SystemTime, index: Option<SystemTime>) -> bool {
    match index {
        Some(index_mtime) => index_mtime <= source,
        None => true,
    }
}
