//! The chat surfaces of the ReportLens site.
//!
//! [`front_page::FrontPageChatBot`] is the floating assistant that answers
//! product questions from a keyword table. [`dashboard::ChatWindow`] is the
//! conversation about an uploaded report, fed by [`upload_box::UploadBox`].
//! Both run on the chat controller from [`reportlens_core`].
//!
//! The crate includes a CLI for trying the surfaces in the terminal.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod dashboard;
pub mod front_page;
pub mod nav;
pub mod upload_box;

use reportlens_core::ChatSnapshot;

/// Re-exports of [`reportlens_core`] crate.
pub mod core {
    pub use reportlens_core::*;
}

/// Re-exports of [`reportlens_model`] crate.
pub mod model {
    pub use reportlens_model::*;
}

/// Renders a transcript as pretty-printed JSON.
pub fn export_transcript(
    snapshot: &ChatSnapshot,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_export_transcript() {
        let bot = front_page::FrontPageChatBot::mount();
        let snapshot = bot.snapshot().await.unwrap();

        let json = export_transcript(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pending"], false);
        assert_eq!(value["messages"][0]["role"], "assistant");
        assert_eq!(value["messages"][0]["text"], front_page::GREETING);
        assert!(value["messages"][0].get("page_references").is_none());
    }
}
