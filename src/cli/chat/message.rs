use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// One turn of the conversation as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: u64,
    pub author: Author,
    /// Assistant bodies may carry `**bold**` markers and line breaks; the
    /// session treats them as opaque text.
    pub body: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(id: u64, author: Author, body: impl Into<String>) -> Self {
        Self {
            id,
            author,
            body: body.into(),
            timestamp: Local::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}
