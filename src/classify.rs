//! Comment Classifier: decides whether a comment comes from a genuine
//! participant or from an automated system.
//!
//! The same function is used at index-build time and at result-rehydration
//! time, so the filtering policy cannot drift between the two paths.

use crate::config::BotsConfig;
use crate::models::Comment;

/// The configured set of automated-system author names.
#[derive(Debug, Clone)]
pub struct BotNames {
    names: Vec<String>,
    normalize: bool,
}

impl BotNames {
    pub fn new(names: Vec<String>, normalize: bool) -> Self {
        Self { names, normalize }
    }

    pub fn from_config(config: &BotsConfig) -> Self {
        Self::new(config.names.clone(), config.normalize)
    }

    /// True if `name` matches a bot entry. Exact equality by default;
    /// with `normalize` both sides are trimmed first.
    pub fn matches(&self, name: &str) -> bool {
        if self.normalize {
            let trimmed = name.trim();
            self.names.iter().any(|n| n.trim() == trimmed)
        } else {
            self.names.iter().any(|n| n == name)
        }
    }
}

/// Classify a comment, first match wins:
/// - registered-user author → genuine
/// - external-user author → genuine unless the display name is a bot name
/// - no author at all → not genuine (pure system message)
pub fn is_genuine(comment: &Comment, bots: &BotNames) -> bool {
    if comment.user.is_some() {
        return true;
    }

    if let Some(external) = &comment.external_user {
        let name = external.name.as_deref().unwrap_or("");
        return !bots.matches(name);
    }

    false
}
