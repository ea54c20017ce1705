use reportlens_actor::{Actor, Message};
use reportlens_model::Role;
use tokio::sync::oneshot;
use tokio::time::sleep;

use super::view::scroll_anchor;
use super::{ChangeKind, ChatChange, ChatSnapshot, ChatState, PendingReply};

impl ChatState {
    fn submit(&mut self, text: String, handle: &Actor<Self>) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            trace!("ignored blank input");
            return;
        }
        if let Some(pending) = &self.pending {
            debug!(ticket = pending.ticket, "reply pending, ignored input");
            return;
        }

        let msg = self.transcript.append(Role::User, text.clone()).clone();
        self.notify(ChangeKind::MessageAppended(msg));
        if let Some(on_submit) = &self.on_submit {
            on_submit(trimmed);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let delay = self.delay.sample();
        trace!(ticket, ?delay, "scheduling reply");

        // The timer only holds a weak handle, so it cannot keep an
        // unmounted chat alive.
        let weak = handle.downgrade();
        let timer = tokio::spawn(async move {
            sleep(delay).await;
            let due = ReplyDue {
                ticket,
                input: text,
            };
            if weak.send(due).is_err() {
                debug!(ticket, "chat unmounted, reply discarded");
            }
        });
        self.pending = Some(PendingReply { ticket, timer });
        self.notify(ChangeKind::PendingChanged(true));
    }

    fn deliver_reply(&mut self, ticket: u64, input: String) {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                warn!(ticket, "stale reply ticket, discarded");
                return;
            }
        }
        self.pending = None;

        match self.responder.reply(&input) {
            Some(reply) => {
                let msg =
                    self.transcript.append(Role::Assistant, reply).clone();
                self.notify(ChangeKind::MessageAppended(msg));
            }
            None => {
                debug!(ticket, "responder stayed silent");
            }
        }
        self.notify(ChangeKind::PendingChanged(false));
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.transcript.messages().to_vec(),
            pending: self.pending.is_some(),
        }
    }

    fn notify(&self, kind: ChangeKind) {
        let Some(on_change) = &self.on_change else {
            return;
        };
        let scroll_to =
            scroll_anchor(self.transcript.messages(), self.pending.is_some());
        on_change(&ChatChange { kind, scroll_to });
    }
}

#[derive(Debug)]
pub struct Submit(pub String);

impl Message<ChatState> for Submit {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.submit(self.0, handle);
    }
}

#[derive(Debug)]
pub struct TakeSnapshot(pub oneshot::Sender<ChatSnapshot>);

impl Message<ChatState> for TakeSnapshot {
    #[inline]
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        // The requester may have given up waiting.
        self.0.send(state.snapshot()).ok();
    }
}

#[derive(Debug)]
struct ReplyDue {
    ticket: u64,
    input: String,
}

impl Message<ChatState> for ReplyDue {
    #[inline]
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        state.deliver_reply(self.ticket, self.input);
    }
}
