use std::sync::{Arc, Weak};

use tracing::Instrument;

use crate::mailbox::{Mailbox, MailboxParts};
use crate::scheduler::run_actor;
use crate::{ActorStopped, Message};

/// Strong handle to an actor.
///
/// The actor keeps running while at least one strong handle exists, or
/// until [`Actor::stop`] is called.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor that owns `state`, with an optional label used
    /// in its tracing span.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let MailboxParts {
            mailbox,
            msg_rx,
            stop_rx,
            exited_tx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_actor(
                Arc::downgrade(&mailbox),
                state,
                msg_rx,
                stop_rx,
                exited_tx,
            )
            .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorStopped> {
        self.mailbox.send(Box::new(msg))
    }

    /// Asks the actor to stop.
    ///
    /// Messages sent after this call are rejected. The message being
    /// handled right now, if any, still runs to completion, then the
    /// state is dropped.
    #[inline]
    pub fn stop(&self) {
        self.mailbox.stop();
    }

    /// Waits until the actor has stopped and its state has been dropped.
    #[inline]
    pub async fn stopped(&self) {
        self.mailbox.exited().await;
    }

    /// Returns `true` if the actor still accepts messages.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_stopping() && !self.mailbox.has_exited()
    }

    /// Creates a weak handle that does not keep the actor alive.
    #[inline]
    pub fn downgrade(&self) -> WeakActor<S> {
        WeakActor {
            mailbox: Arc::downgrade(&self.mailbox),
        }
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}

/// Weak handle to an actor.
///
/// Intended for background work that reports back to the actor later,
/// like timers. Such work must not extend the actor's lifetime: once all
/// strong handles are gone, sending through a weak handle fails.
pub struct WeakActor<S> {
    mailbox: Weak<Mailbox<S>>,
}

impl<S: Send + 'static> WeakActor<S> {
    /// Attempts to upgrade to a strong handle.
    #[inline]
    pub fn upgrade(&self) -> Option<Actor<S>> {
        self.mailbox.upgrade().map(Actor::from_mailbox)
    }

    /// Sends a message to the actor if it is still reachable.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorStopped> {
        self.upgrade().ok_or(ActorStopped)?.send(msg)
    }
}

impl<S> Clone for WeakActor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Weak::clone(&self.mailbox),
        }
    }
}
