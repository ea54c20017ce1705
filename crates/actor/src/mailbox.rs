use std::fmt::Debug;

use tokio::sync::{mpsc, watch};

use crate::{Actor, ActorStopped};

/// Helper trait for handling boxed messages.
pub trait BoxMessage<S>: Send + Debug + 'static {
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

/// A message the actor can handle.
///
/// Handlers run on the actor task, one at a time and to completion, so
/// they get exclusive access to the state without any locking.
pub trait Message<S>: BoxMessage<S> {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> BoxMessage<S> for M {
    #[inline]
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

impl<S, M: Message<S> + ?Sized> Message<S> for Box<M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.handle_box(state, handle)
    }
}

pub type BoxedMessage<S> = Box<dyn Message<S>>;

pub struct MailboxParts<S> {
    pub mailbox: Mailbox<S>,
    pub msg_rx: mpsc::UnboundedReceiver<BoxedMessage<S>>,
    pub stop_rx: watch::Receiver<bool>,
    pub exited_tx: watch::Sender<bool>,
}

pub struct Mailbox<S> {
    msg_tx: mpsc::UnboundedSender<BoxedMessage<S>>,
    stop_tx: watch::Sender<bool>,
    exited_rx: watch::Receiver<bool>,
}

impl<S: Send + 'static> Mailbox<S> {
    #[inline]
    pub fn new() -> MailboxParts<S> {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        let (exited_tx, exited_rx) = watch::channel(false);
        MailboxParts {
            mailbox: Mailbox {
                msg_tx,
                stop_tx,
                exited_rx,
            },
            msg_rx,
            stop_rx,
            exited_tx,
        }
    }

    #[inline]
    pub fn send(&self, msg: BoxedMessage<S>) -> Result<(), ActorStopped> {
        if self.is_stopping() {
            return Err(ActorStopped);
        }
        self.msg_tx.send(msg).map_err(|_| ActorStopped)
    }

    #[inline]
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    #[inline]
    pub fn is_stopping(&self) -> bool {
        *self.stop_tx.borrow()
    }

    #[inline]
    pub fn has_exited(&self) -> bool {
        *self.exited_rx.borrow()
    }

    pub async fn exited(&self) {
        let mut exited_rx = self.exited_rx.clone();
        // The flag is set before the sender goes away, so an error here
        // can only mean the actor task was cancelled with its runtime.
        exited_rx.wait_for(|exited| *exited).await.ok();
    }
}
