use serde::{Deserialize, Serialize};

/// Characters of the first message used to name a new thread locally
const THREAD_NAME_PREVIEW: usize = 40;

/// A persisted conversation, as listed by `GET /threads/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: String,
    pub name: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Thread {
    /// Fresh client-side thread id (UUID v4)
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Local entry for a thread the backend created on its first message.
    pub fn started_with(thread_id: impl Into<String>, first_message: &str) -> Self {
        let mut name: String = first_message.chars().take(THREAD_NAME_PREVIEW).collect();
        if first_message.chars().count() > THREAD_NAME_PREVIEW {
            name.push_str("...");
        }
        Self {
            thread_id: thread_id.into(),
            name,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// `updated_at` rendered in local-ish form; falls back to the raw value.
    pub fn updated_label(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.updated_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(&self.updated_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            })
            .unwrap_or_else(|_| self.updated_at.clone())
    }
}

/// Who wrote a displayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A (name, url) pair pointing at supporting material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A single displayed message in the open conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sources: Vec<SourceCitation>,
    /// Seconds the backend spent producing the answer
    pub response_time: Option<f64>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sources: Vec::new(),
            response_time: None,
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
            sources: Vec::new(),
            response_time: None,
        }
    }

    pub fn response_time_label(&self) -> Option<String> {
        match (self.sender, self.response_time) {
            (Sender::Ai, Some(secs)) => Some(format!("Answered in {:.2} s", secs)),
            _ => None,
        }
    }
}

/// One stored message as returned by `GET /threads/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceCitation>>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl From<HistoryEntry> for ChatMessage {
    fn from(entry: HistoryEntry) -> Self {
        let sender = if entry.kind == "human" { Sender::User } else { Sender::Ai };
        ChatMessage {
            sender,
            text: entry.content,
            sources: entry.sources.unwrap_or_default(),
            response_time: entry.response_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadHistory {
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// Body returned by `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceCitation>>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl From<ChatReply> for ChatMessage {
    fn from(reply: ChatReply) -> Self {
        ChatMessage {
            sender: Sender::Ai,
            text: reply.answer,
            sources: reply.sources.unwrap_or_default(),
            response_time: reply.response_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestBody<'a> {
    pub thread_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchDeleteBody<'a> {
    pub thread_ids: &'a [String],
}
