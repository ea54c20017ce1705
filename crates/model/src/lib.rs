//! Types shared by every ReportLens chat surface.
//!
//! This crate holds the data the surfaces exchange: transcript messages,
//! upload descriptors, and the [`Responder`] contract that decides what the
//! assistant says. It defines no behavior beyond small helpers. Timing,
//! transcript ownership and rendering live in the crates that use it.

#![deny(missing_docs)]

mod message;
mod responder;
mod upload;

pub use message::*;
pub use responder::*;
pub use upload::*;
