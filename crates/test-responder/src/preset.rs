use reportlens_model::Reply;
use serde::{Deserialize, Serialize};

/// One scripted turn of the assistant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Reply with this text and page references.
    #[serde(rename = "text")]
    Text(Reply),
    /// Stay silent for this turn.
    #[serde(rename = "silent")]
    Silent,
}

impl PresetReply {
    /// Creates a text reply.
    #[inline]
    pub fn text<R: Into<Reply>>(reply: R) -> Self {
        Self::Text(reply.into())
    }

    #[inline]
    pub(crate) fn into_reply(self) -> Option<Reply> {
        match self {
            Self::Text(reply) => Some(reply),
            Self::Silent => None,
        }
    }
}
