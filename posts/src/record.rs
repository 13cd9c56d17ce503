use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record from the posts backend.
///
/// The backend doesn't publish a schema, so the record is kept as the raw JSON
/// value. Display code reads a few well-known fields through the accessors
/// below and falls back to the raw JSON when none of them are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(pub Value);

impl Post {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The record's `id`, if it has a string or integer one.
    pub fn id(&self) -> Option<String> {
        match self.field("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<String> {
        self.first_text(&["title", "name"])
    }

    pub fn summary(&self) -> Option<String> {
        self.first_text(&["description", "body", "content"])
    }

    pub fn date(&self) -> Option<String> {
        self.first_text(&["date", "createdAt", "created_at"])
    }

    pub fn location(&self) -> Option<String> {
        self.first_text(&["location", "venue"])
    }

    /// Compact JSON text of the record. Object keys come out sorted, so two
    /// structurally equal records always produce the same text.
    pub fn to_canonical_json(&self) -> String {
        self.0.to_string()
    }

    fn first_text(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| match self.field(name)? {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    }
}

impl From<Value> for Post {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
