//! Core logic of the ReportLens chat surfaces: the chat transcript
//! controller, the keyword response engine, and upload intake.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat;
pub mod engine;
pub mod intake;
pub mod transcript;

pub use chat::{
    ChangeKind, Chat, ChatBuilder, ChatChange, ChatSnapshot, DEFAULT_GREETING,
    ReplyDelay, ScrollAnchor,
};
pub use engine::{KeywordEngine, Topic};
pub use reportlens_actor::ActorStopped;
