//! Document Composer: flattens a ticket into one retrievable text unit.
//!
//! The title is included twice to up-weight title terms relative to body
//! content in embedding space. Empty descriptions and bodies are skipped
//! entirely rather than joined as empty strings.

use crate::classify::{is_genuine, BotNames};
use crate::models::{Document, Ticket};

/// Comment filtering counts, reported for observability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeStats {
    pub total_comments: usize,
    pub included_comments: usize,
}

impl ComposeStats {
    pub fn add(&mut self, other: ComposeStats) {
        self.total_comments += other.total_comments;
        self.included_comments += other.included_comments;
    }
}

/// Compose a ticket at corpus position `index` into a [`Document`].
pub fn compose(index: usize, ticket: &Ticket, bots: &BotNames) -> (Document, ComposeStats) {
    let mut parts: Vec<&str> = Vec::new();
    let mut stats = ComposeStats::default();

    parts.push(&ticket.title);
    parts.push(&ticket.title);

    if let Some(description) = &ticket.description {
        if !description.is_empty() {
            parts.push(description);
        }
    }

    for comment in &ticket.comments {
        stats.total_comments += 1;

        if !is_genuine(comment, bots) {
            continue;
        }
        if let Some(body) = &comment.body {
            if !body.is_empty() {
                parts.push(body);
                stats.included_comments += 1;
            }
        }
    }

    let document = Document {
        index,
        identifier: ticket.identifier.clone(),
        title: ticket.title.clone(),
        text: parts.join(" "),
    };

    (document, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Comment};

    fn bots() -> BotNames {
        BotNames::new(vec!["Problème résolu".to_string()], false)
    }

    fn user_comment(name: &str, body: &str) -> Comment {
        Comment {
            body: Some(body.to_string()),
            user: Some(Author {
                name: Some(name.to_string()),
            }),
            external_user: None,
        }
    }

    fn bot_comment(body: &str) -> Comment {
        Comment {
            body: Some(body.to_string()),
            user: None,
            external_user: Some(Author {
                name: Some("Problème résolu".to_string()),
            }),
        }
    }

    fn ticket(title: &str, description: Option<&str>, comments: Vec<Comment>) -> Ticket {
        Ticket {
            identifier: "HT-1".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            url: None,
            comments,
        }
    }

    #[test]
    fn title_appears_twice() {
        let (doc, _) = compose(0, &ticket("Device offline", None, vec![]), &bots());
        assert_eq!(doc.text, "Device offline Device offline");
    }

    #[test]
    fn description_and_genuine_comments_follow_title() {
        let t = ticket(
            "Device offline",
            Some("stops responding"),
            vec![user_comment("Ana", "restarted the loop")],
        );
        let (doc, stats) = compose(3, &t, &bots());
        assert_eq!(
            doc.text,
            "Device offline Device offline stops responding restarted the loop"
        );
        assert_eq!(doc.index, 3);
        assert_eq!(stats.total_comments, 1);
        assert_eq!(stats.included_comments, 1);
    }

    #[test]
    fn bot_comment_bodies_are_excluded() {
        let t = ticket(
            "Device offline",
            None,
            vec![
                bot_comment("Issue resolved automatically"),
                user_comment("Ana", "restarted the loop"),
            ],
        );
        let (doc, stats) = compose(0, &t, &bots());
        assert!(!doc.text.contains("Issue resolved automatically"));
        assert!(doc.text.contains("restarted the loop"));
        assert_eq!(stats.total_comments, 2);
        assert_eq!(stats.included_comments, 1);
    }

    #[test]
    fn empty_fields_do_not_leave_spurious_spaces() {
        let empty_body = Comment {
            body: Some(String::new()),
            user: Some(Author {
                name: Some("Ana".to_string()),
            }),
            external_user: None,
        };
        let no_body = Comment {
            body: None,
            user: Some(Author {
                name: Some("Ana".to_string()),
            }),
            external_user: None,
        };
        let t = ticket("Title", Some(""), vec![empty_body, no_body]);
        let (doc, stats) = compose(0, &t, &bots());
        assert_eq!(doc.text, "Title Title");
        assert_eq!(stats.total_comments, 2);
        assert_eq!(stats.included_comments, 0);
    }

    #[test]
    fn comment_order_is_preserved() {
        let t = ticket(
            "T",
            None,
            vec![
                user_comment("Ana", "first"),
                user_comment("Bob", "second"),
                user_comment("Cyd", "third"),
            ],
        );
        let (doc, _) = compose(0, &t, &bots());
        assert_eq!(doc.text, "T T first second third");
    }
}
