//! The report chat window on the dashboard.

use std::sync::Arc;

use reportlens_core::{Chat, ChatBuilder, ChatChange, ChatSnapshot, ReplyDelay};
use reportlens_model::{Reply, Responder, UploadDescriptor};

/// The first thing the dashboard assistant says about a report.
pub const GREETING: &str = "Hello! I've analyzed your financial report. I can help you understand key metrics, trends, and specific details. What would you like to know?";

/// Title of the empty state shown before a report is attached.
pub const EMPTY_TITLE: &str = "Upload a financial report to begin";

/// Body of the empty state shown before a report is attached.
pub const EMPTY_BODY: &str = "Once you upload a document, I'll analyze it and we can start our conversation about your financial data.";

/// Example questions shown in the help panel.
pub const HELP_TIPS: [&str; 4] = [
    "What were the main revenue streams?",
    "Show me the profit margins for Q4",
    "Compare this year's performance to last year",
    "What are the key risks mentioned?",
];

type SendMessageFn = Arc<dyn Fn(&str) + Send + Sync>;
type ChangeFn = Arc<dyn Fn(&ChatChange) + Send + Sync>;

/// The reply source used until the dashboard is wired to a backend.
///
/// It logs each question and never answers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unwired;

impl Responder for Unwired {
    fn reply(&self, input: &str) -> Option<Reply> {
        info!(input, "no backend wired, question left unanswered");
        None
    }
}

/// [`ChatWindow`] builder.
pub struct ChatWindowBuilder {
    responder: Arc<dyn Responder>,
    delay: ReplyDelay,
    on_send_message: Option<SendMessageFn>,
    on_change: Option<ChangeFn>,
}

impl ChatWindowBuilder {
    /// Sets the reply source for every report attached to the window.
    #[inline]
    pub fn with_responder<R: Responder + 'static>(
        mut self,
        responder: R,
    ) -> Self {
        self.responder = Arc::new(responder);
        self
    }

    /// Sets the reply delay.
    #[inline]
    pub fn with_delay(mut self, delay: ReplyDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Attaches a callback invoked with the trimmed text of every accepted
    /// question.
    #[inline]
    pub fn on_send_message(
        mut self,
        on_send_message: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_send_message = Some(Arc::new(on_send_message));
        self
    }

    /// Attaches a callback invoked after every chat change.
    #[inline]
    pub fn on_change(
        mut self,
        on_change: impl Fn(&ChatChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Creates the window, waiting for a report.
    #[inline]
    pub fn build(self) -> ChatWindow {
        ChatWindow {
            config: self,
            mounted: None,
            show_help: false,
        }
    }
}

/// What the window currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState<'a> {
    /// No report yet, so the empty state is shown instead of a chat.
    AwaitingUpload,
    /// A conversation about this report.
    Conversation(&'a UploadDescriptor),
}

struct MountedChat {
    upload: UploadDescriptor,
    chat: Chat,
}

/// The dashboard chat window.
///
/// The window holds at most one conversation, about the attached report.
/// Attaching another report starts a fresh conversation, and the old one
/// is unmounted.
pub struct ChatWindow {
    config: ChatWindowBuilder,
    mounted: Option<MountedChat>,
    show_help: bool,
}

impl ChatWindow {
    /// Creates a builder. Questions go unanswered until a responder is set.
    pub fn builder() -> ChatWindowBuilder {
        ChatWindowBuilder {
            responder: Arc::new(Unwired),
            delay: ReplyDelay::default(),
            on_send_message: None,
            on_change: None,
        }
    }

    /// Starts a conversation about `upload`.
    ///
    /// Must be called within a tokio runtime.
    pub fn attach(&mut self, upload: UploadDescriptor) {
        self.detach();

        let responder = Arc::clone(&self.config.responder);
        let mut chat_builder = ChatBuilder::with_shared_responder(responder)
            .with_greeting(GREETING)
            .with_delay(self.config.delay)
            .with_label("dashboard");
        if let Some(on_send_message) = &self.config.on_send_message {
            let on_send_message = Arc::clone(on_send_message);
            chat_builder =
                chat_builder.on_submit(move |text| on_send_message(text));
        }
        if let Some(on_change) = &self.config.on_change {
            let on_change = Arc::clone(on_change);
            chat_builder =
                chat_builder.on_change(move |change| on_change(change));
        }

        debug!(file_name = %upload.file_name, "report attached");
        self.mounted = Some(MountedChat {
            upload,
            chat: chat_builder.build(),
        });
    }

    /// Ends the current conversation, if any, and shows the empty state.
    pub fn detach(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.chat.unmount();
        }
    }

    /// What the window currently shows.
    #[inline]
    pub fn state(&self) -> WindowState<'_> {
        match &self.mounted {
            Some(mounted) => WindowState::Conversation(&mounted.upload),
            None => WindowState::AwaitingUpload,
        }
    }

    /// The file name and summary line shown above the conversation.
    pub fn header(&self) -> Option<(&str, String)> {
        self.mounted.as_ref().map(|mounted| {
            (mounted.upload.file_name.as_str(), mounted.upload.summary())
        })
    }

    /// Submits a question about the attached report.
    ///
    /// Ignored while no report is attached.
    pub fn submit<S: Into<String>>(&self, text: S) {
        match &self.mounted {
            Some(mounted) => mounted.chat.submit(text),
            None => debug!("no report attached, input ignored"),
        }
    }

    /// Returns the conversation, or `None` while no report is attached.
    pub async fn snapshot(&self) -> Option<ChatSnapshot> {
        let mounted = self.mounted.as_ref()?;
        mounted.chat.snapshot().await.ok()
    }

    /// Shows or hides the help panel.
    #[inline]
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// The example questions, while the help panel is shown.
    #[inline]
    pub fn help_tips(&self) -> Option<&'static [&'static str]> {
        self.show_help.then_some(&HELP_TIPS[..])
    }
}

impl Drop for ChatWindow {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use reportlens_core::ChangeKind;
    use reportlens_model::MimeCategory;
    use reportlens_test_responder::ScriptedResponder;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, timeout};

    use super::*;

    fn tata_steel() -> UploadDescriptor {
        UploadDescriptor::new(
            "TATASTEEL_Q4_2024.pdf",
            2_516_582,
            MimeCategory::Pdf,
        )
        .with_page_count(45)
    }

    #[tokio::test]
    async fn test_prompt_state_without_upload() {
        let window = ChatWindow::builder().build();
        assert_eq!(window.state(), WindowState::AwaitingUpload);
        assert_eq!(window.header(), None);

        window.submit("What were the main revenue drivers in Q4?");
        assert_eq!(window.snapshot().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unwired_window_forwards_but_never_answers() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let (change_tx, mut change_rx) = mpsc::unbounded_channel();
        let mut window = ChatWindow::builder()
            .on_send_message({
                let sent = Arc::clone(&sent);
                move |text| sent.lock().unwrap().push(text.to_owned())
            })
            .on_change(move |change| {
                change_tx.send(change.kind.clone()).ok();
            })
            .build();
        window.attach(tata_steel());

        let (file_name, summary) = window.header().unwrap();
        assert_eq!(file_name, "TATASTEEL_Q4_2024.pdf");
        assert_eq!(summary, "PDF • 2.40 MB • 45 pages");

        window.submit(" What were the main revenue drivers in Q4? ");
        loop {
            let kind = timeout(Duration::from_secs(5), change_rx.recv())
                .await
                .unwrap()
                .unwrap();
            if kind == ChangeKind::PendingChanged(false) {
                break;
            }
        }

        let snapshot = window.snapshot().await.unwrap();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].text, GREETING);
        assert!(snapshot.last().unwrap().is_user());
        assert!(!snapshot.pending);
        assert_eq!(
            *sent.lock().unwrap(),
            ["What were the main revenue drivers in Q4?"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_starts_fresh_conversation() {
        let responder = ScriptedResponder::default();
        responder.add_reply("Steel output rose 25%.");
        let mut window = ChatWindow::builder()
            .with_responder(responder.clone())
            .with_delay(ReplyDelay::fixed(Duration::from_millis(1000)))
            .build();

        window.attach(tata_steel());
        window.submit("What drove revenue?");
        sleep(Duration::from_millis(1500)).await;
        let snapshot = window.snapshot().await.unwrap();
        assert_eq!(snapshot.last().unwrap().text, "Steel output rose 25%.");

        let reliance = UploadDescriptor::new(
            "RELIANCE_AR.pdf",
            1_048_576,
            MimeCategory::Pdf,
        );
        window.attach(reliance.clone());
        assert_eq!(window.state(), WindowState::Conversation(&reliance));
        let snapshot = window.snapshot().await.unwrap();
        assert_eq!(snapshot.messages.len(), 1);

        window.detach();
        assert_eq!(window.state(), WindowState::AwaitingUpload);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_while_pending_discards_reply() {
        let responder = ScriptedResponder::default();
        responder.add_reply("Never shown.");
        let mut window = ChatWindow::builder()
            .with_responder(responder.clone())
            .build();

        window.attach(tata_steel());
        window.submit("Any risks?");
        assert!(window.snapshot().await.unwrap().pending);
        window.detach();

        sleep(Duration::from_secs(3)).await;
        assert!(responder.received().is_empty());
    }

    #[test]
    fn test_help_panel() {
        let mut window = ChatWindow::builder().build();
        assert_eq!(window.help_tips(), None);
        window.toggle_help();
        assert_eq!(window.help_tips().unwrap().len(), 4);
        window.toggle_help();
        assert_eq!(window.help_tips(), None);
    }
}
