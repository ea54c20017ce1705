use std::error::Error;
use std::fmt;

/// Returned when a message is sent to an actor that has already stopped,
/// either because it was stopped explicitly or because every strong handle
/// to it was dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorStopped;

impl fmt::Debug for ActorStopped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorStopped").finish()
    }
}

impl fmt::Display for ActorStopped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the actor has stopped".fmt(f)
    }
}

impl Error for ActorStopped {}
