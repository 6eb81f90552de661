//! Diagnostic progress reporting for `tix build` and `tix search`.
//!
//! Everything here is emitted on **stderr** so stdout stays reserved for
//! the structured search output and the two streams never interleave in
//! downstream consumers.

use std::io::Write;

/// A single diagnostic event from the pipeline.
#[derive(Clone, Debug)]
pub enum Event {
    LoadingCorpus { path: String },
    CorpusLoaded { tickets: u64 },
    CommentsFiltered { included: u64, total: u64 },
    Encoding { documents: u64, model: String },
    IndexSaved { path: String, bytes: u64 },
    IndexFresh { path: String },
    LoadingIndex { path: String },
    Searching { query: String, model: String },
    ModelMismatch { configured: String, stored: String },
}

/// Reports pipeline diagnostics. Implementations write to stderr.
pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

/// Human-friendly diagnostics on stderr.
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&self, event: Event) {
        let line = match &event {
            Event::LoadingCorpus { path } => format!("loading tickets from {}...\n", path),
            Event::CorpusLoaded { tickets } => {
                format!("found {} tickets\n", format_number(*tickets))
            }
            Event::CommentsFiltered { included, total } => {
                format!("comment filtering: {}/{} included\n", included, total)
            }
            Event::Encoding { documents, model } => format!(
                "encoding {} documents with {}...\n",
                format_number(*documents),
                model
            ),
            Event::IndexSaved { path, bytes } => {
                format!("index saved to {} ({} bytes)\n", path, format_number(*bytes))
            }
            Event::IndexFresh { path } => format!(
                "index is already up to date (delete {} or pass --force to rebuild)\n",
                path
            ),
            Event::LoadingIndex { path } => format!("loading index from {}...\n", path),
            Event::Searching { query, model } => {
                format!("searching for \"{}\" with {}...\n", query, model)
            }
            Event::ModelMismatch { configured, stored } => format!(
                "warning: config names model '{}' but index was built with '{}'; using '{}'\n",
                configured, stored, stored
            ),
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable diagnostics: one JSON object per line on stderr.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, event: Event) {
        let obj = match &event {
            Event::LoadingCorpus { path } => {
                serde_json::json!({"event": "loading_corpus", "path": path})
            }
            Event::CorpusLoaded { tickets } => {
                serde_json::json!({"event": "corpus_loaded", "tickets": tickets})
            }
            Event::CommentsFiltered { included, total } => {
                serde_json::json!({"event": "comments_filtered", "included": included, "total": total})
            }
            Event::Encoding { documents, model } => {
                serde_json::json!({"event": "encoding", "documents": documents, "model": model})
            }
            Event::IndexSaved { path, bytes } => {
                serde_json::json!({"event": "index_saved", "path": path, "bytes": bytes})
            }
            Event::IndexFresh { path } => {
                serde_json::json!({"event": "index_fresh", "path": path})
            }
            Event::LoadingIndex { path } => {
                serde_json::json!({"event": "loading_index", "path": path})
            }
            Event::Searching { query, model } => {
                serde_json::json!({"event": "searching", "query": query, "model": model})
            }
            Event::ModelMismatch { configured, stored } => {
                serde_json::json!({"event": "model_mismatch", "configured": configured, "stored": stored})
            }
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when diagnostics are disabled.
pub struct NoReporter;

impl Reporter for NoReporter {
    fn report(&self, _event: Event) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Diagnostics mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Off,
    Human,
    Json,
}

impl Mode {
    /// Default: human diagnostics when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            Mode::Human
        } else {
            Mode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn Reporter> {
        match self {
            Mode::Off => Box::new(NoReporter),
            Mode::Human => Box::new(StderrReporter),
            Mode::Json => Box::new(JsonReporter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
