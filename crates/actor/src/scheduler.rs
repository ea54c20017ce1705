use std::sync::Weak;

use tokio::select;
use tokio::sync::{mpsc, watch};

use crate::mailbox::{BoxedMessage, Mailbox};
use crate::{Actor, Message};

pub async fn run_actor<S: Send + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    mut msg_rx: mpsc::UnboundedReceiver<BoxedMessage<S>>,
    mut stop_rx: watch::Receiver<bool>,
    exited_tx: watch::Sender<bool>,
) {
    debug!("started");
    loop {
        let msg = select! {
            biased;

            // Also fires when the mailbox is gone, which means no handle
            // can reach this actor anymore.
            _ = stop_rx.changed() => {
                break;
            }
            msg = msg_rx.recv() => {
                let Some(msg) = msg else {
                    break;
                };
                msg
            }
        };
        trace!("received message: {msg:?}");

        let Some(mailbox) = mailbox.upgrade() else {
            debug!("all handles dropped, discarding {msg:?}");
            break;
        };

        let proc_span = trace_span!("proc msg");
        proc_span.in_scope(|| {
            msg.handle(&mut state, &Actor::from_mailbox(mailbox));
            trace!("finished");
        });
    }

    msg_rx.close();
    drop(state);
    exited_tx.send_replace(true);
    debug!("stopped");
}
