//! Retriever: top-k cosine ranking over the stored index and rehydration of
//! full ticket detail for presentation.
//!
//! The index stores only the composed text, so each hit's description, URL,
//! and comment list are re-fetched from the original corpus by corpus
//! position, with the same genuine-comment filter that was applied at
//! build time.

use anyhow::Result;

use crate::classify::{is_genuine, BotNames};
use crate::config::Config;
use crate::corpus;
use crate::embedding;
use crate::error::Error;
use crate::index::{self, Index};
use crate::models::{Document, ResultComment, SearchResult, Ticket};
use crate::progress::{Event, Reporter};

/// Rank every stored document against `query` by cosine similarity and
/// return at most `k` `(corpus position, score)` pairs, best first.
///
/// Ties are broken by corpus order so output is deterministic.
pub fn top_k(query: &[f32], index: &Index, k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = index
        .documents
        .iter()
        .map(|doc| {
            (
                doc.document.index,
                embedding::cosine_similarity(query, &doc.embedding),
            )
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    scored.truncate(k);
    scored
}

/// Assemble one ranked result, recomputing the genuine-comment subset for
/// display with the same classifier used at build time.
pub fn to_search_result(
    rank: usize,
    similarity: f32,
    document: &Document,
    ticket: &Ticket,
    bots: &BotNames,
) -> SearchResult {
    let comments = ticket
        .comments
        .iter()
        .filter(|comment| is_genuine(comment, bots))
        .map(|comment| ResultComment {
            author: resolve_author_name(comment),
            body: comment.body.clone().unwrap_or_default(),
        })
        .collect();

    SearchResult {
        rank,
        similarity,
        identifier: document.identifier.clone(),
        title: document.title.clone(),
        description: ticket.description.clone(),
        url: ticket.url.clone(),
        comments,
    }
}

fn resolve_author_name(comment: &crate::models::Comment) -> String {
    if let Some(user) = &comment.user {
        user.name.clone().unwrap_or_else(|| "Unknown User".to_string())
    } else if let Some(external) = &comment.external_user {
        external
            .name
            .clone()
            .unwrap_or_else(|| "Unknown External".to_string())
    } else {
        "Unknown".to_string()
    }
}

/// Run the full query path: load the index, reload the model it was built
/// with, encode the query, rank, rehydrate, and print a JSON array of
/// results to stdout.
pub async fn run_search(
    config: &Config,
    query: &str,
    limit: usize,
    reporter: &dyn Reporter,
) -> Result<()> {
    reporter.report(Event::LoadingIndex {
        path: config.index.path.display().to_string(),
    });
    let stored = index::load(&config.index.path)?;

    // Always trust the model name recorded in the index; the configured
    // model only matters for the next build.
    let mut embed_config = config.embedding.clone();
    if let Some(configured) = &embed_config.model {
        if configured != &stored.model_name {
            reporter.report(Event::ModelMismatch {
                configured: configured.clone(),
                stored: stored.model_name.clone(),
            });
        }
    }
    embed_config.model = Some(stored.model_name.clone());

    let provider = embedding::create_provider(&embed_config)?;
    reporter.report(Event::Searching {
        query: query.to_string(),
        model: stored.model_name.clone(),
    });

    let query_vec = embedding::encode_query(provider.as_ref(), &embed_config, query).await?;
    if query_vec.len() != stored.dims {
        return Err(Error::ModelUnavailable {
            model: stored.model_name.clone(),
            reason: format!(
                "produces {}-dim vectors but the index was built with {}-dim vectors; \
                 run `tix build` to rebuild",
                query_vec.len(),
                stored.dims
            ),
        }
        .into());
    }

    let hits = top_k(&query_vec, &stored, limit);

    // Rehydrate full ticket detail from the original corpus.
    let tickets = corpus::load_tickets(&config.corpus.path)?;
    let bots = BotNames::from_config(&config.bots);

    let mut results = Vec::with_capacity(hits.len());
    for (rank, (position, similarity)) in hits.iter().enumerate() {
        let indexed = stored
            .documents
            .iter()
            .find(|d| d.document.index == *position)
            .ok_or_else(|| anyhow::anyhow!("index is missing document at position {}", position))?;
        let ticket = tickets.get(*position).ok_or_else(|| Error::MalformedInput {
            reason: format!(
                "corpus no longer contains ticket at position {}; run `tix build`",
                position
            ),
        })?;
        results.push(to_search_result(
            rank + 1,
            *similarity,
            &indexed.document,
            ticket,
            &bots,
        ));
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
