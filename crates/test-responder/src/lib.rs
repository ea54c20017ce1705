//! A scripted responder for testing chat surfaces.

#![deny(missing_docs)]

mod preset;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use reportlens_model::{Reply, Responder};

pub use preset::*;

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    received: Vec<String>,
}

/// A responder that plays back preset replies in order.
///
/// Every input it is asked about is recorded, which lets tests check
/// whether a surface consulted its responder at all. Once the script runs
/// out, the responder stays silent.
///
/// Clones share the same script, so a test can keep one clone for
/// inspection and hand the other to the surface.
#[derive(Clone, Default)]
pub struct ScriptedResponder {
    script: Arc<Mutex<Script>>,
}

impl ScriptedResponder {
    /// Creates a responder with the given script.
    pub fn with_replies(
        replies: impl IntoIterator<Item = PresetReply>,
    ) -> Self {
        let responder = Self::default();
        responder.lock().replies.extend(replies);
        responder
    }

    /// Appends a reply to the script.
    #[inline]
    pub fn add_reply<R: Into<Reply>>(&self, reply: R) {
        self.lock().replies.push_back(PresetReply::text(reply));
    }

    /// Appends a silent turn to the script.
    #[inline]
    pub fn add_silence(&self) {
        self.lock().replies.push_back(PresetReply::Silent);
    }

    /// Returns every input received so far, oldest first.
    #[inline]
    pub fn received(&self) -> Vec<String> {
        self.lock().received.clone()
    }

    /// Returns the number of scripted replies not played yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A test that panicked while holding the lock has already failed.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Responder for ScriptedResponder {
    fn reply(&self, input: &str) -> Option<Reply> {
        let mut script = self.lock();
        script.received.push(input.to_owned());
        script.replies.pop_front().and_then(PresetReply::into_reply)
    }
}
