use std::fmt;

use serde::Serialize;

/// Identifier of a canned answer in the response catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Opening message of every session. Never produced by [`classify`].
    Welcome,
    Greeting,
    Web,
    Chatbot,
    Pricing,
    DeliveryTime,
    Contact,
    Thanks,
    Fallback,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::Welcome,
        Intent::Greeting,
        Intent::Web,
        Intent::Chatbot,
        Intent::Pricing,
        Intent::DeliveryTime,
        Intent::Contact,
        Intent::Thanks,
        Intent::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Welcome => "welcome",
            Intent::Greeting => "greeting",
            Intent::Web => "web",
            Intent::Chatbot => "chatbot",
            Intent::Pricing => "pricing",
            Intent::DeliveryTime => "delivery_time",
            Intent::Contact => "contact",
            Intent::Thanks => "thanks",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, checked top to bottom. The first rule with any keyword
/// contained in the lowercased input wins, so the order here decides
/// multi-keyword inputs ("cuánto cuesta un chatbot" is a chatbot question).
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hola", "buenos días", "buenas"]),
    (Intent::Web, &["web", "página", "sitio"]),
    (Intent::Chatbot, &["chatbot", "bot"]),
    (Intent::Pricing, &["precio", "costo", "cuánto", "presupuesto"]),
    (Intent::DeliveryTime, &["tiempo", "plazo", "cuándo", "duración"]),
    (Intent::Contact, &["contacto", "llamar", "email", "teléfono"]),
    (Intent::Thanks, &["gracias", "ok", "perfecto"]),
];

/// Classify a user message into the intent whose canned answer should be sent.
///
/// Matching is a case-insensitive substring test; there is no "no match"
/// outcome, anything unrecognised resolves to [`Intent::Fallback`].
/// Callers are expected to reject blank input before calling this.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}
