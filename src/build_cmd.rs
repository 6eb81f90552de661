//! Build-path orchestration: staleness check → load → compose → encode →
//! persist.
//!
//! Rebuilds are always whole-corpus; there is no incremental update of a
//! single document.

use anyhow::Result;

use crate::classify::BotNames;
use crate::compose::{compose, ComposeStats};
use crate::config::Config;
use crate::corpus;
use crate::embedding;
use crate::index;
use crate::progress::{Event, Reporter};

/// Build (or rebuild) the index from the corpus.
///
/// When the artifact already exists and is newer than the corpus, this is
/// a no-op unless `force` is set. Staleness is a signal, not an error.
pub async fn run_build(config: &Config, force: bool, reporter: &dyn Reporter) -> Result<()> {
    if !force && !index::is_stale(&config.corpus.path, &config.index.path)? {
        reporter.report(Event::IndexFresh {
            path: config.index.path.display().to_string(),
        });
        return Ok(());
    }

    reporter.report(Event::LoadingCorpus {
        path: config.corpus.path.display().to_string(),
    });
    let tickets = corpus::load_tickets(&config.corpus.path)?;
    reporter.report(Event::CorpusLoaded {
        tickets: tickets.len() as u64,
    });

    let bots = BotNames::from_config(&config.bots);
    let mut documents = Vec::with_capacity(tickets.len());
    let mut stats = ComposeStats::default();
    for (position, ticket) in tickets.iter().enumerate() {
        let (document, ticket_stats) = compose(position, ticket, &bots);
        documents.push(document);
        stats.add(ticket_stats);
    }
    reporter.report(Event::CommentsFiltered {
        included: stats.included_comments as u64,
        total: stats.total_comments as u64,
    });

    let provider = embedding::create_provider(&config.embedding)?;
    reporter.report(Event::Encoding {
        documents: documents.len() as u64,
        model: provider.model_name().to_string(),
    });

    let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
    let embeddings =
        embedding::encode_documents(provider.as_ref(), &config.embedding, &texts).await?;

    let built = index::build(documents, embeddings, provider.model_name())?;
    index::save(&built, &config.index.path)?;

    let bytes = std::fs::metadata(&config.index.path)
        .map(|m| m.len())
        .unwrap_or(0);
    reporter.report(Event::IndexSaved {
        path: config.index.path.display().to_string(),
        bytes,
    });

    Ok(())
}
