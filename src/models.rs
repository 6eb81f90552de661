//! Core data types that flow through the indexing and retrieval pipeline.

use serde::{Deserialize, Serialize};

/// A support ticket as loaded from the corpus export.
///
/// Tickets are read-only snapshots of the external ticketing system; nothing
/// downstream mutates them. Order in the corpus file is significant: a
/// [`Document`]'s `index` field points back into it.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub comments: Vec<Comment>,
}

/// A single comment on a ticket.
///
/// `user` is a registered account in the ticketing system; `external_user`
/// is a portal/email participant. A comment with neither is a pure
/// system-generated message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<Author>,
    #[serde(default)]
    pub external_user: Option<Author>,
}

/// An author reference carrying a display name.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

/// One retrievable unit derived from a ticket: its searchable text plus the
/// metadata needed to map a hit back to the source corpus.
///
/// Pure derived data — never mutated after composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Position of the source ticket in corpus load order.
    pub index: usize,
    pub identifier: String,
    pub title: String,
    /// Composed text: title twice, description, then genuine comment bodies.
    pub text: String,
}

/// A ranked search hit with full ticket detail rehydrated from the corpus.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub rank: usize,
    pub similarity: f32,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub comments: Vec<ResultComment>,
}

/// A genuine comment in a search result, with its author name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ResultComment {
    pub author: String,
    pub body: String,
}
