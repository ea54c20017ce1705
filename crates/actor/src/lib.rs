//! A small actor runtime.
//!
//! Each actor is a tokio task that owns its state exclusively. Mutations
//! arrive as messages and are handled one after another, so the state
//! needs no locks. Handles can be downgraded to [`WeakActor`], which lets
//! delayed work report back without keeping the actor alive.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorStopped;
pub use handle::{Actor, WeakActor};
pub use mailbox::Message;
