//! The floating assistant on the marketing pages.

use std::sync::Arc;

use reportlens_core::{
    ActorStopped, Chat, ChatBuilder, ChatChange, ChatSnapshot, KeywordEngine,
    ReplyDelay,
};
use reportlens_model::Responder;

/// The first thing the front-page assistant says.
pub const GREETING: &str = "Hi! I'm here to help you learn about Stocks Labs AI. Ask me about our features, pricing, or how to get started!";

/// How much of the chat bot is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Only the launcher button is shown.
    #[default]
    Closed,
    /// The full chat card is shown.
    Expanded,
    /// Only the card header is shown.
    Minimized,
}

impl Visibility {
    /// Returns `true` unless the chat is closed.
    #[inline]
    pub fn is_open(&self) -> bool {
        *self != Visibility::Closed
    }
}

/// [`FrontPageChatBot`] builder.
pub struct FrontPageChatBotBuilder {
    responder: Arc<dyn Responder>,
    delay: ReplyDelay,
    on_change: Option<Box<dyn Fn(&ChatChange) + Send + Sync>>,
}

impl FrontPageChatBotBuilder {
    /// Replaces the keyword engine with another responder.
    #[inline]
    pub fn with_responder<R: Responder + 'static>(self, responder: R) -> Self {
        self.with_shared_responder(Arc::new(responder))
    }

    /// Replaces the keyword engine with a responder shared with others.
    #[inline]
    pub fn with_shared_responder(
        mut self,
        responder: Arc<dyn Responder>,
    ) -> Self {
        self.responder = responder;
        self
    }

    /// Sets the reply delay.
    #[inline]
    pub fn with_delay(mut self, delay: ReplyDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Attaches a callback invoked after every chat change.
    #[inline]
    pub fn on_change(
        mut self,
        on_change: impl Fn(&ChatChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Mounts the chat bot, initially closed.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self) -> FrontPageChatBot {
        let mut chat_builder =
            ChatBuilder::with_shared_responder(self.responder)
                .with_greeting(GREETING)
                .with_delay(self.delay)
                .with_label("front page");
        if let Some(on_change) = self.on_change {
            chat_builder = chat_builder.on_change(on_change);
        }
        FrontPageChatBot {
            chat: chat_builder.build(),
            visibility: Visibility::Closed,
        }
    }
}

/// The front-page chat bot.
///
/// It answers from [`KeywordEngine::front_page`] unless told otherwise.
/// The transcript survives opening, minimizing and closing the card, and
/// is discarded when the bot is dropped.
pub struct FrontPageChatBot {
    chat: Chat,
    visibility: Visibility,
}

impl FrontPageChatBot {
    /// Creates a builder with the default engine and timing.
    pub fn builder() -> FrontPageChatBotBuilder {
        FrontPageChatBotBuilder {
            responder: Arc::new(KeywordEngine::front_page()),
            delay: ReplyDelay::default(),
            on_change: None,
        }
    }

    /// Mounts a chat bot with default settings.
    ///
    /// Must be called within a tokio runtime.
    #[inline]
    pub fn mount() -> Self {
        Self::builder().build()
    }

    /// Current visibility.
    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Opens the card. Does nothing if it is already open.
    pub fn open(&mut self) {
        if self.visibility == Visibility::Closed {
            self.visibility = Visibility::Expanded;
        }
    }

    /// Switches between the full card and its header. Does nothing while
    /// closed.
    pub fn toggle_minimized(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Closed,
            Visibility::Expanded => Visibility::Minimized,
            Visibility::Minimized => Visibility::Expanded,
        };
    }

    /// Closes the card back to the launcher button.
    #[inline]
    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
    }

    /// Submits a question. See [`Chat::submit`].
    #[inline]
    pub fn submit<S: Into<String>>(&self, text: S) {
        self.chat.submit(text);
    }

    /// Returns the current transcript and pending flag.
    #[inline]
    pub async fn snapshot(&self) -> Result<ChatSnapshot, ActorStopped> {
        self.chat.snapshot().await
    }

    /// The underlying chat controller.
    #[inline]
    pub fn chat(&self) -> &Chat {
        &self.chat
    }
}

impl Drop for FrontPageChatBot {
    fn drop(&mut self) {
        self.chat.unmount();
    }
}
