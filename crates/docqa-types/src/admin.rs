use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named grouping of ingested documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

/// Per-collection entry of `GET /collections/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    pub name: String,
    #[serde(default)]
    pub document_count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DbStats {
    #[serde(default)]
    pub total_collections: u64,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub details: Vec<CollectionDetail>,
}

impl DbStats {
    /// Best-effort join by collection name.
    pub fn document_count(&self, collection: &str) -> Option<u64> {
        self.details
            .iter()
            .find(|d| d.name == collection)
            .map(|d| d.document_count)
    }
}

/// Latency aggregates in seconds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseStats {
    #[serde(default)]
    pub average_response_time: f64,
    #[serde(default)]
    pub fastest_response_time: f64,
    #[serde(default)]
    pub slowest_response_time: f64,
    #[serde(default)]
    pub total_ai_messages: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenUsageStats {
    #[serde(default)]
    pub total_prompt_tokens: u64,
    #[serde(default)]
    pub total_completion_tokens: u64,
    #[serde(default)]
    pub grand_total_tokens: u64,
    #[serde(default)]
    pub total_llm_calls: u64,
}

/// Everything the admin dashboard shows, fetched as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub db_stats: DbStats,
    pub collections: Vec<Collection>,
    pub response_stats: ResponseStats,
    pub token_stats: TokenUsageStats,
}

/// Collection table row with its joined document count
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRow {
    pub id: String,
    pub name: String,
    pub document_count: Option<u64>,
}

impl CollectionRow {
    pub fn count_label(&self) -> String {
        self.document_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl Dashboard {
    pub fn rows(&self) -> Vec<CollectionRow> {
        self.collections
            .iter()
            .map(|c| CollectionRow {
                id: c.id.clone(),
                name: c.name.clone(),
                document_count: self.db_stats.document_count(&c.name),
            })
            .collect()
    }
}

/// A stored chunk inside a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Document {
    /// Content cut to `max_chars`, with an ellipsis when shortened.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let mut out: String = self.content.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }

    /// Metadata as display pairs; strings are shown without quotes.
    pub fn metadata_pairs(&self) -> Vec<(String, String)> {
        self.metadata
            .iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(default)]
    pub has_next: bool,
}

impl Pagination {
    /// 1-based page number
    pub fn page(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    /// "first - last" of the documents on this page, 1-based
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "0 - 0".to_string();
        }
        let last = (self.offset + self.limit).min(self.total);
        format!("{} - {}", self.offset + 1, last)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub pagination: Pagination,
}

/// Accept either a JSON string or number as an identifier.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
