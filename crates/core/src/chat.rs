mod builder;
mod state;
mod view;

use std::sync::Arc;

use reportlens_actor::{Actor, ActorStopped};
use reportlens_model::Responder;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::transcript::Transcript;
pub use builder::{ChatBuilder, DEFAULT_GREETING, ReplyDelay};
use state::{Submit, TakeSnapshot};
pub use view::{ChangeKind, ChatChange, ChatSnapshot, ScrollAnchor};

type ChangeFn = Box<dyn Fn(&ChatChange) + Send + Sync>;
type SubmitFn = Box<dyn Fn(&str) + Send + Sync>;

/// The state owned by a chat controller.
///
/// Only the controller's actor task touches it, so user input, timer
/// completions and snapshot requests are applied strictly one at a time.
pub(crate) struct ChatState {
    transcript: Transcript,
    pending: Option<PendingReply>,
    next_ticket: u64,
    responder: Arc<dyn Responder>,
    delay: ReplyDelay,

    on_submit: Option<SubmitFn>,
    on_change: Option<ChangeFn>,
}

struct PendingReply {
    ticket: u64,
    timer: JoinHandle<()>,
}

impl Drop for ChatState {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(ticket = pending.ticket, "unmounted with a reply pending");
            pending.timer.abort();
        }
    }
}

/// A chat transcript controller.
///
/// The controller owns one transcript and the rules for growing it: input
/// is accepted only while no reply is pending, each accepted input gets a
/// user message right away, and the responder is consulted after a
/// randomized delay. Both chat surfaces compose this type instead of
/// keeping their own copies of that logic.
///
/// Handles are cheap to clone. The controller stops when [`Chat::unmount`]
/// is called or when the last handle is dropped. A reply still pending at
/// that point is discarded.
#[derive(Clone)]
pub struct Chat {
    handle: Actor<ChatState>,
}

impl Chat {
    /// Submits user input.
    ///
    /// Whitespace-only input and input arriving while a reply is pending
    /// are ignored without notice. So is input sent after unmounting.
    pub fn submit<S: Into<String>>(&self, text: S) {
        if self.handle.send(Submit(text.into())).is_err() {
            debug!("chat is unmounted, input dropped");
        }
    }

    /// Returns the current transcript and pending flag.
    ///
    /// The snapshot reflects every input submitted through this handle
    /// before the call.
    pub async fn snapshot(&self) -> Result<ChatSnapshot, ActorStopped> {
        let (tx, rx) = oneshot::channel();
        self.handle.send(TakeSnapshot(tx))?;
        rx.await.map_err(|_| ActorStopped)
    }

    /// Stops the controller and discards any pending reply.
    #[inline]
    pub fn unmount(&self) {
        self.handle.stop();
    }

    /// Waits until the controller has stopped and dropped its transcript.
    #[inline]
    pub async fn unmounted(&self) {
        self.handle.stopped().await;
    }

    /// Returns `true` until the controller is unmounted.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.handle.is_alive()
    }
}

impl Chat {
    fn spawn_from_builder(builder: ChatBuilder) -> Self {
        let ChatBuilder {
            greeting,
            responder,
            delay,
            label,
            on_submit,
            on_change,
        } = builder;

        let state = ChatState {
            transcript: Transcript::with_greeting(greeting),
            pending: None,
            next_ticket: 1,
            responder,
            delay,
            on_submit,
            on_change,
        };
        let label = label.as_deref().unwrap_or("chat");
        let handle = Actor::spawn(state, Some(label));
        Self { handle }
    }
}
