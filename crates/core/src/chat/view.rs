use reportlens_model::Message;
use serde::Serialize;

/// The entry a chat view should be scrolled to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAnchor {
    /// The message with this id.
    Message(String),
    /// The typing indicator below the newest message.
    TypingIndicator,
}

/// What changed in a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// A message was appended to the transcript.
    MessageAppended(Message),
    /// A reply started or stopped being pending.
    PendingChanged(bool),
}

/// A change notification.
///
/// Views pin their scroll position to `scroll_to` after applying the
/// change, which keeps the newest entry in sight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatChange {
    /// What changed.
    pub kind: ChangeKind,
    /// The newest entry after the change.
    pub scroll_to: ScrollAnchor,
}

/// A point-in-time copy of a chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatSnapshot {
    /// The transcript, in send order.
    pub messages: Vec<Message>,
    /// Whether an assistant reply is in flight.
    pub pending: bool,
}

impl ChatSnapshot {
    /// The newest message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The entry the view should be scrolled to.
    pub fn scroll_anchor(&self) -> ScrollAnchor {
        scroll_anchor(&self.messages, self.pending)
    }
}

pub(super) fn scroll_anchor(
    messages: &[Message],
    pending: bool,
) -> ScrollAnchor {
    match messages.last() {
        Some(msg) if !pending => ScrollAnchor::Message(msg.id.clone()),
        _ => ScrollAnchor::TypingIndicator,
    }
}
