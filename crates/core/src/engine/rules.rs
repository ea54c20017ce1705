use super::{Rule, Topic, Trigger};

/// Reply used when no front-page rule matches.
pub const FALLBACK_REPLY: &str = "That's a great question! I'd be happy to help you learn more about Stocks Labs AI. You can also reach our team directly at rohan@stockslabs.ai or try our platform at /reportlens. Is there anything specific about our AI financial analysis you'd like to know?";

const PRICING_REPLY: &str = "Our pricing is designed to be affordable for retail investors. We offer flexible plans starting from basic document analysis. Would you like me to connect you with our sales team for detailed pricing?";

const HOW_IT_WORKS_REPLY: &str = "It's simple! Just upload your financial reports (PDF, DOCX, or Excel), and our AI will analyze them instantly. You can then ask specific questions about the data and get answers with page references. Try our demo at /reportlens!";

const FORMATS_REPLY: &str = "We support PDF, DOCX, and Excel files up to 50MB. Our AI can parse annual reports, quarterly results, financial statements, and more. The files should be text-searchable for best results.";

const TECHNOLOGY_REPLY: &str = "We use advanced language models specifically trained for financial analysis. Our AI can understand complex financial terminology, extract key metrics, and provide contextual answers with source citations.";

const SECURITY_REPLY: &str = "Security is our top priority. All documents are encrypted in transit and at rest. We don't store your files permanently and follow strict data privacy protocols. Your financial data remains confidential.";

const DEMO_REPLY: &str = "Absolutely! You can try our platform right now. Click 'Get Started' or visit our ReportLens page to upload a sample financial report and see the AI in action.";

const CONTACT_REPLY: &str = "You can reach our support team at rohan@stockslabs.ai or through the contact form on this page. We're based in Bangalore, India and typically respond within a few hours.";

const GREETING_REPLY: &str = "Hello! Welcome to Stocks Labs AI. I'm here to answer any questions about our AI-powered financial analysis platform. What would you like to know?";

/// The front-page table. Order matters: earlier rules shadow later ones.
pub(super) fn front_page() -> Vec<Rule> {
    vec![
        Rule::new(
            Topic::Pricing,
            Trigger::any_keyword(["price", "cost", "pricing"]),
            PRICING_REPLY,
        ),
        Rule::new(
            Topic::HowItWorks,
            Trigger::all_of([
                Trigger::keyword("how"),
                Trigger::any_keyword(["work", "use"]),
            ]),
            HOW_IT_WORKS_REPLY,
        ),
        Rule::new(
            Topic::SupportedFormats,
            Trigger::any_keyword(["file", "format", "upload"]),
            FORMATS_REPLY,
        ),
        Rule::new(
            Topic::Technology,
            Trigger::any_keyword(["ai", "technology"]),
            TECHNOLOGY_REPLY,
        ),
        Rule::new(
            Topic::Security,
            Trigger::any_keyword(["security", "safe", "privacy"]),
            SECURITY_REPLY,
        ),
        Rule::new(
            Topic::Demo,
            Trigger::any_keyword(["demo", "try", "test"]),
            DEMO_REPLY,
        ),
        Rule::new(
            Topic::Contact,
            Trigger::any_keyword(["contact", "support", "help"]),
            CONTACT_REPLY,
        ),
        Rule::new(
            Topic::Greeting,
            Trigger::any_keyword(["hello", "hi", "hey"]),
            GREETING_REPLY,
        ),
    ]
}
