//! Ticket Loader: reads the raw corpus from the ticketing system's JSON
//! export and yields tickets in file order.
//!
//! The export is the raw GraphQL response shape: `data.issues.nodes`, each
//! node carrying `comments.nodes`. A missing file is [`Error::MissingSource`];
//! anything that does not deserialize (including a ticket without an
//! `identifier` or `title`) fails the whole load as
//! [`Error::MalformedInput`] — a partially composed corpus would silently
//! degrade ranking quality downstream.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::Error;
use crate::models::{Comment, Ticket};

#[derive(Deserialize)]
struct Export {
    data: ExportData,
}

#[derive(Deserialize)]
struct ExportData {
    issues: IssueConnection,
}

#[derive(Deserialize)]
struct IssueConnection {
    nodes: Vec<RawTicket>,
}

#[derive(Deserialize)]
struct RawTicket {
    identifier: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    comments: CommentConnection,
}

#[derive(Deserialize, Default)]
struct CommentConnection {
    #[serde(default)]
    nodes: Vec<Comment>,
}

impl RawTicket {
    fn into_ticket(self) -> Ticket {
        Ticket {
            identifier: self.identifier,
            title: self.title,
            description: self.description,
            url: self.url,
            comments: self.comments.nodes,
        }
    }
}

/// Load all tickets from the corpus export at `path`, preserving order.
pub fn load_tickets(path: &Path) -> Result<Vec<Ticket>> {
    if !path.exists() {
        return Err(Error::MissingSource {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus: {}", path.display()))?;

    let export: Export = serde_json::from_str(&content).map_err(|e| Error::MalformedInput {
        reason: e.to_string(),
    })?;

    Ok(export
        .data
        .issues
        .nodes
        .into_iter()
        .map(RawTicket::into_ticket)
        .collect())
}
