use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use reportlens_model::Responder;

use super::{Chat, ChatChange};

/// Greeting used when the builder is not given one.
pub const DEFAULT_GREETING: &str = "Hi! How can I help you today?";

/// How long the assistant appears to think before replying.
///
/// Each reply waits for a duration drawn uniformly from `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplyDelay {
    min: Duration,
    max: Duration,
}

impl ReplyDelay {
    /// A delay drawn from `[min, max)`. Bounds given in the wrong order
    /// are swapped.
    #[inline]
    pub fn between(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Always waits exactly `delay`.
    #[inline]
    pub fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    /// The shortest possible delay.
    #[inline]
    pub fn min(&self) -> Duration {
        self.min
    }

    /// The exclusive upper bound, or the fixed delay.
    #[inline]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws a delay.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

impl Default for ReplyDelay {
    #[inline]
    fn default() -> Self {
        Self::between(Duration::from_millis(1000), Duration::from_millis(2000))
    }
}

/// [`Chat`] builder.
pub struct ChatBuilder {
    pub(crate) greeting: String,
    pub(crate) responder: Arc<dyn Responder>,
    pub(crate) delay: ReplyDelay,
    pub(crate) label: Option<String>,
    pub(crate) on_submit: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub(crate) on_change: Option<Box<dyn Fn(&ChatChange) + Send + Sync>>,
}

impl ChatBuilder {
    /// Creates a new builder with the specified responder.
    #[inline]
    pub fn with_responder<R: Responder + 'static>(responder: R) -> Self {
        Self::with_shared_responder(Arc::new(responder))
    }

    /// Creates a new builder with a responder shared with other chats.
    #[inline]
    pub fn with_shared_responder(responder: Arc<dyn Responder>) -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_owned(),
            responder,
            delay: ReplyDelay::default(),
            label: None,
            on_submit: None,
            on_change: None,
        }
    }

    /// Sets the assistant greeting the transcript starts with.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Sets the reply delay.
    #[inline]
    pub fn with_delay(mut self, delay: ReplyDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the label of the controller's tracing span.
    #[inline]
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches a callback invoked with the trimmed text of every accepted
    /// submission.
    #[inline]
    pub fn on_submit(
        mut self,
        on_submit: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_submit = Some(Box::new(on_submit));
        self
    }

    /// Attaches a callback invoked after every transcript or pending-flag
    /// change.
    ///
    /// The callback runs on the controller task. Keep it short, e.g. by
    /// forwarding the change to a channel.
    #[inline]
    pub fn on_change(
        mut self,
        on_change: impl Fn(&ChatChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Builds and mounts the chat. Must be called within a tokio runtime.
    #[inline]
    pub fn build(self) -> Chat {
        Chat::spawn_from_builder(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_range() {
        let delay = ReplyDelay::default();
        assert_eq!(delay.min(), Duration::from_millis(1000));
        assert_eq!(delay.max(), Duration::from_millis(2000));
        for _ in 0..200 {
            let sampled = delay.sample();
            assert!(sampled >= delay.min() && sampled < delay.max());
        }
    }

    #[test]
    fn test_fixed_and_swapped_delays() {
        let fixed = ReplyDelay::fixed(Duration::from_millis(5));
        assert_eq!(fixed.sample(), Duration::from_millis(5));

        let swapped = ReplyDelay::between(
            Duration::from_millis(30),
            Duration::from_millis(10),
        );
        assert_eq!(swapped.min(), Duration::from_millis(10));
        assert_eq!(swapped.max(), Duration::from_millis(30));
    }
}
