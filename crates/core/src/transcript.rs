//! Transcript-related types.

use chrono::{DateTime, Local};
use reportlens_model::{Message, Reply, Role};

/// Formats a time of day the way chat bubbles show it, e.g. `10:30 AM`.
#[inline]
pub fn display_time(at: DateTime<Local>) -> String {
    at.format("%I:%M %p").to_string()
}

/// An append-only, in-memory list of messages.
///
/// A transcript always starts with one assistant greeting. It is owned by
/// a single chat controller and lives exactly as long as that controller.
#[derive(Clone, Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    /// Creates a transcript seeded with an assistant greeting.
    pub fn with_greeting<S: Into<String>>(greeting: S) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.append(Role::Assistant, Reply::new(greeting));
        transcript
    }

    /// Appends a message sent now and returns it.
    ///
    /// `body` carries the text and any page references.
    pub(crate) fn append<B: Into<Reply>>(
        &mut self,
        role: Role,
        body: B,
    ) -> &Message {
        let Reply {
            text,
            page_references,
        } = body.into();
        let id = format!("msg:{}", self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            text,
            sent_at: display_time(Local::now()),
            page_references,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// All messages in send order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The newest message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages, greeting included.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false` for a seeded transcript.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_seeded_with_greeting() {
        let transcript = Transcript::with_greeting("Hi there!");
        assert_eq!(transcript.len(), 1);
        let greeting = transcript.last().unwrap();
        assert_eq!(greeting.id, "msg:1");
        assert!(greeting.is_assistant());
        assert_eq!(greeting.text, "Hi there!");
    }

    #[test]
    fn test_append_keeps_order_and_ids() {
        let mut transcript = Transcript::with_greeting("Hi there!");
        transcript.append(Role::User, "What is the EBITDA?");
        transcript.append(Role::Assistant, "It is 4.2B.");

        let ids: Vec<_> =
            transcript.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["msg:1", "msg:2", "msg:3"]);
        let roles: Vec<_> =
            transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn test_append_keeps_page_references() {
        let mut transcript = Transcript::with_greeting("Hi there!");
        let question = transcript.append(Role::User, "Where is PAT?").clone();
        assert_eq!(question.page_references, None);

        let answer = transcript.append(
            Role::Assistant,
            Reply::new("See the P&L.").with_page_references(["Page 12"]),
        );
        assert_eq!(answer.text, "See the P&L.");
        assert_eq!(
            answer.page_references.as_deref(),
            Some(&["Page 12".to_owned()][..])
        );
    }

    #[test]
    fn test_display_time() {
        let at = Local.with_ymd_and_hms(2024, 5, 2, 22, 31, 0).unwrap();
        assert_eq!(display_time(at), "10:31 PM");
        let at = Local.with_ymd_and_hms(2024, 5, 2, 9, 5, 0).unwrap();
        assert_eq!(display_time(at), "09:05 AM");
    }
}
