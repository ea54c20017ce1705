use serde::{Deserialize, Serialize};

/// Who sent a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Text typed by the visitor.
    User,
    /// Text produced by the assistant.
    Assistant,
}

/// One entry in a chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Identifier used for keying the entry in a view.
    ///
    /// Unique within one transcript. It carries no meaning beyond that.
    pub id: String,
    /// The sender.
    pub role: Role,
    /// The message body.
    pub text: String,
    /// Time of day the message was sent, already formatted for display.
    pub sent_at: String,
    /// Report pages the message refers to, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_references: Option<Vec<String>>,
}

impl Message {
    /// Returns `true` if the visitor sent this message.
    #[inline]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns `true` if the assistant sent this message.
    #[inline]
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_page_references_are_optional_on_the_wire() {
        let msg = Message {
            id: "msg:1".to_owned(),
            role: Role::Assistant,
            text: "Hello!".to_owned(),
            sent_at: "10:30 AM".to_owned(),
            page_references: None,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "msg:1",
                "role": "assistant",
                "text": "Hello!",
                "sent_at": "10:30 AM",
            })
        );

        let with_pages: Message = serde_json::from_value(json!({
            "id": "msg:3",
            "role": "assistant",
            "text": "See the Q4 section.",
            "sent_at": "10:31 AM",
            "page_references": ["Page 12", "Page 13"],
        }))
        .unwrap();
        assert!(with_pages.is_assistant());
        assert_eq!(
            with_pages.page_references.as_deref(),
            Some(&["Page 12".to_owned(), "Page 13".to_owned()][..])
        );
    }
}
