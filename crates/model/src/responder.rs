use serde::{Deserialize, Serialize};

/// What the assistant says in one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reply {
    /// The message body.
    pub text: String,
    /// Report pages backing the answer, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_references: Option<Vec<String>>,
}

impl Reply {
    /// Creates a reply without page references.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            page_references: None,
        }
    }

    /// Cites the given report pages.
    pub fn with_page_references<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.page_references =
            Some(pages.into_iter().map(Into::into).collect());
        self
    }
}

impl From<String> for Reply {
    #[inline]
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Reply {
    #[inline]
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Produces the assistant's side of a conversation.
///
/// A chat surface consults its responder once per accepted user input,
/// after the simulated thinking delay. Implementations are synchronous and
/// should not depend on earlier calls: the surface does not pass any
/// conversation history.
///
/// Returning `None` means the assistant stays silent for this input. The
/// surface then appends nothing and only clears its pending state.
pub trait Responder: Send + Sync {
    /// Returns the reply for `input`, if any.
    fn reply(&self, input: &str) -> Option<Reply>;
}

impl<F, R> Responder for F
where
    F: Fn(&str) -> Option<R> + Send + Sync,
    R: Into<Reply>,
{
    #[inline]
    fn reply(&self, input: &str) -> Option<Reply> {
        self(input).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_page_references_are_optional_on_the_wire() {
        let plain = Reply::from("Margins held steady.");
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({ "text": "Margins held steady." })
        );

        let cited = Reply::new("Revenue rose 12%.")
            .with_page_references(["Page 12", "Page 15"]);
        assert_eq!(
            serde_json::to_value(&cited).unwrap(),
            json!({
                "text": "Revenue rose 12%.",
                "page_references": ["Page 12", "Page 15"],
            })
        );
    }
}
