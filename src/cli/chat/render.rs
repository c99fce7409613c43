use color_print::cformat;
use regex::{Captures, Regex};

use super::message::{Author, Message};

/// How assistant markup is turned into terminal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Ansi,
    /// Markers are stripped, no escape codes are emitted.
    Plain,
}

impl Style {
    pub fn from_plain_flag(plain: bool) -> Self {
        if plain {
            Style::Plain
        } else {
            Style::Ansi
        }
    }
}

/// Render a message body line by line.
///
/// A line that starts and ends with `**` becomes a heading with every
/// marker removed, `**span**` inside a
/// line is emphasised, and blank lines are kept as spacing.
pub fn format_body(body: &str, style: Style) -> String {
    let inline = Regex::new(r"\*\*(.+?)\*\*").ok();

    body.split('\n')
        .map(|line| {
            if is_heading(line) {
                let text = line.replace("**", "");
                return match style {
                    Style::Ansi => cformat!("<bold><cyan>{}</></>", text),
                    Style::Plain => text,
                };
            }

            match &inline {
                Some(re) => match style {
                    Style::Ansi => re
                        .replace_all(line, |caps: &Captures| cformat!("<bold>{}</>", &caps[1]))
                        .into_owned(),
                    Style::Plain => re.replace_all(line, "$1").into_owned(),
                },
                None => line.to_string(),
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn is_heading(line: &str) -> bool {
    line.len() > 4 && line.starts_with("**") && line.ends_with("**")
}

/// Render a message with its author label and `HH:MM` time.
pub fn format_message(message: &Message, style: Style) -> String {
    let time = message.timestamp.format("%H:%M").to_string();
    let body = format_body(&message.body, style);

    let header = match (message.author, style) {
        (Author::Assistant, Style::Ansi) => cformat!("<magenta><bold>Nova</></> <dim>{}</>", time),
        (Author::User, Style::Ansi) => cformat!("<cyan><bold>Tú</></> <dim>{}</>", time),
        (Author::Assistant, Style::Plain) => format!("Nova {}", time),
        (Author::User, Style::Plain) => format!("Tú {}", time),
    };

    format!("{}\n{}\n", header, body)
}
