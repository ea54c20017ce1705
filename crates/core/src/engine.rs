//! Keyword-driven replies for the front-page assistant.
//!
//! The engine is an ordered table of rules. Each rule pairs a [`Trigger`]
//! with a canned reply. Input is lowercased once, and the rules are tried
//! top to bottom; the first one whose trigger matches wins. Nothing is
//! scored and no history is kept, so the same input always gets the same
//! reply.

mod rules;

use std::borrow::Cow;

use reportlens_model::{Reply, Responder};

pub use rules::FALLBACK_REPLY;

/// What a reply is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Plans and prices.
    Pricing,
    /// How to use the product.
    HowItWorks,
    /// Accepted file formats and limits.
    SupportedFormats,
    /// The analysis technology.
    Technology,
    /// Data security and privacy.
    Security,
    /// Trying the product.
    Demo,
    /// Reaching the team.
    Contact,
    /// Small talk.
    Greeting,
    /// Nothing matched.
    Fallback,
}

/// A condition on the lowercased input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The input contains this substring.
    Keyword(Cow<'static, str>),
    /// At least one of the inner triggers matches.
    AnyOf(Vec<Trigger>),
    /// Every inner trigger matches.
    AllOf(Vec<Trigger>),
}

impl Trigger {
    /// A substring trigger. The keyword is lowercased so that matching is
    /// case-insensitive on both sides.
    pub fn keyword<S: Into<Cow<'static, str>>>(keyword: S) -> Self {
        let keyword = keyword.into();
        if keyword.chars().any(char::is_uppercase) {
            Self::Keyword(Cow::Owned(keyword.to_lowercase()))
        } else {
            Self::Keyword(keyword)
        }
    }

    /// Matches when the input contains any of `keywords`.
    pub fn any_keyword<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self::AnyOf(keywords.into_iter().map(Self::keyword).collect())
    }

    /// Matches when every trigger in `triggers` matches.
    pub fn all_of(triggers: impl IntoIterator<Item = Trigger>) -> Self {
        Self::AllOf(triggers.into_iter().collect())
    }

    /// Tests the trigger against input that is already lowercased.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Keyword(keyword) => lowered.contains(keyword.as_ref()),
            Self::AnyOf(triggers) => {
                triggers.iter().any(|t| t.matches(lowered))
            }
            Self::AllOf(triggers) => {
                triggers.iter().all(|t| t.matches(lowered))
            }
        }
    }
}

/// One row of the rule table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    /// What the reply is about.
    pub topic: Topic,
    /// When the rule applies.
    pub trigger: Trigger,
    /// The reply text.
    pub reply: Cow<'static, str>,
}

impl Rule {
    /// Creates a rule.
    #[inline]
    pub fn new<S: Into<Cow<'static, str>>>(
        topic: Topic,
        trigger: Trigger,
        reply: S,
    ) -> Self {
        Self {
            topic,
            trigger,
            reply: reply.into(),
        }
    }
}

/// First-match-wins keyword responder.
#[derive(Clone, Debug)]
pub struct KeywordEngine {
    rules: Vec<Rule>,
    fallback: Cow<'static, str>,
}

impl KeywordEngine {
    /// Creates an engine from an ordered rule table and the reply used
    /// when no rule matches.
    pub fn new<S: Into<Cow<'static, str>>>(
        rules: Vec<Rule>,
        fallback: S,
    ) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The engine behind the front-page assistant.
    pub fn front_page() -> Self {
        Self::new(rules::front_page(), FALLBACK_REPLY)
    }

    /// The rule table, in evaluation order.
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the first rule that matches `input`.
    pub fn matched_rule(&self, input: &str) -> Option<&Rule> {
        let lowered = input.to_lowercase();
        self.rules.iter().find(|rule| rule.trigger.matches(&lowered))
    }

    /// Returns the topic of the reply `input` would get.
    #[inline]
    pub fn classify(&self, input: &str) -> Topic {
        self.matched_rule(input)
            .map_or(Topic::Fallback, |rule| rule.topic)
    }

    /// Returns the reply for `input`.
    #[inline]
    pub fn respond(&self, input: &str) -> &str {
        self.matched_rule(input)
            .map_or(self.fallback.as_ref(), |rule| rule.reply.as_ref())
    }
}

impl Responder for KeywordEngine {
    #[inline]
    fn reply(&self, input: &str) -> Option<Reply> {
        Some(Reply::new(self.respond(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_page_topics() {
        let engine = KeywordEngine::front_page();
        let cases = [
            ("hello", Topic::Greeting),
            ("what is your pricing", Topic::Pricing),
            ("How much does it COST?", Topic::Pricing),
            ("how does it work", Topic::HowItWorks),
            ("Which formats do you take?", Topic::SupportedFormats),
            ("tell me about the technology", Topic::Technology),
            ("is my data safe", Topic::Security),
            ("can I see a demo", Topic::Demo),
            ("I need support", Topic::Contact),
            ("hey", Topic::Greeting),
            ("xyzzy", Topic::Fallback),
            ("", Topic::Fallback),
        ];
        for (input, topic) in cases {
            assert_eq!(engine.classify(input), topic, "input: {input:?}");
        }
    }

    #[test]
    fn test_first_match_wins() {
        let engine = KeywordEngine::front_page();
        let input = "How do I use this and what's the pricing?";

        // Both the pricing and the how-it-works rule are satisfied.
        let how = &engine.rules()[1];
        assert_eq!(how.topic, Topic::HowItWorks);
        assert!(how.trigger.matches(&input.to_lowercase()));

        assert_eq!(engine.classify(input), Topic::Pricing);
        assert_eq!(engine.respond(input), engine.rules()[0].reply);
    }

    #[test]
    fn test_all_of_needs_every_part() {
        let engine = KeywordEngine::front_page();
        // "how" alone is not enough for the how-it-works rule.
        assert_eq!(engine.classify("how"), Topic::Fallback);
        assert_eq!(engine.classify("use"), Topic::Fallback);
        assert_eq!(engine.classify("HOW should I USE it"), Topic::HowItWorks);
    }

    #[test]
    fn test_substring_matching_is_literal() {
        let engine = KeywordEngine::front_page();
        // "ai" hides inside "explain", and it outranks the greeting.
        assert_eq!(engine.classify("hi, explain please"), Topic::Technology);
        // "hi" hides inside "this".
        assert_eq!(engine.classify("this"), Topic::Greeting);
    }

    #[test]
    fn test_respond_is_pure() {
        let engine = KeywordEngine::front_page();
        for input in ["hello", "what is your pricing", "xyzzy"] {
            assert_eq!(engine.respond(input), engine.respond(input));
        }
        assert_eq!(engine.respond("xyzzy"), FALLBACK_REPLY);
        assert_eq!(engine.reply("xyzzy"), Some(Reply::new(FALLBACK_REPLY)));
    }

    #[test]
    fn test_custom_table() {
        let engine = KeywordEngine::new(
            vec![
                Rule::new(
                    Topic::Security,
                    Trigger::all_of([
                        Trigger::keyword("GDPR"),
                        Trigger::any_keyword(["comply", "compliant"]),
                    ]),
                    "Yes, we are GDPR compliant.",
                ),
                Rule::new(
                    Topic::Greeting,
                    Trigger::keyword("namaste"),
                    "Namaste!",
                ),
            ],
            "Sorry?",
        );

        assert_eq!(
            engine.respond("Are you gdpr COMPLIANT?"),
            "Yes, we are GDPR compliant."
        );
        assert_eq!(engine.respond("gdpr"), "Sorry?");
        assert_eq!(engine.classify("Namaste"), Topic::Greeting);
        assert!(engine.matched_rule("bonjour").is_none());
    }
}
