//! Typed error kinds for the indexing and search pipeline.
//!
//! All of these are fatal at this layer: they carry a complete, actionable
//! message and are surfaced through `anyhow` without any retry or degraded
//! mode. Staleness is deliberately not an error — it triggers a rebuild.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The ticket corpus file does not exist.
    #[error("corpus not found at {path}: export the tickets first, then run `tix build`")]
    MissingSource { path: PathBuf },

    /// A query was attempted but no index artifact exists.
    #[error("index not found at {path}: run `tix build` to create it")]
    MissingIndex { path: PathBuf },

    /// The corpus exists but does not match the expected export shape.
    #[error("malformed corpus: {reason}")]
    MalformedInput { reason: String },

    /// The named embedding model cannot be loaded or does not match the index.
    #[error("embedding model '{model}' unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },
}
