/// A canned shortcut the user can pick instead of typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickReply {
    pub label: &'static str,
    pub value: &'static str,
}

pub const QUICK_REPLIES: [QuickReply; 4] = [
    QuickReply {
        label: "💻 Páginas Web",
        value: "cuéntame sobre páginas web",
    },
    QuickReply {
        label: "🤖 Chatbots IA",
        value: "información sobre chatbots",
    },
    QuickReply {
        label: "💰 Precios",
        value: "cuánto cuesta",
    },
    QuickReply {
        label: "⏱️ Tiempo",
        value: "tiempo de desarrollo",
    },
];

/// Look up a shortcut by its 1-based number as typed after the slash.
pub fn by_number(number: &str) -> Option<&'static QuickReply> {
    let index = number.parse::<usize>().ok()?;
    index.checked_sub(1).and_then(|i| QUICK_REPLIES.get(i))
}

/// One line per shortcut, numbered the way `/N` expects.
pub fn menu() -> String {
    QUICK_REPLIES
        .iter()
        .enumerate()
        .map(|(i, reply)| format!("/{}  {}", i + 1, reply.label))
        .collect::<Vec<String>>()
        .join("\n")
}
