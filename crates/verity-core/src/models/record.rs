use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A labeled corpus entry.
///
/// `statement`, `subject`, `speaker` and `label` drive chunking and
/// interpretation. Every other field of the source entry is kept in `extra`
/// so that chunk metadata is the full original record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub statement: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub speaker: String,
    /// Ordinal truth label (0–5 for LIAR, or 0/1).
    pub label: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Record {
    pub fn new(
        statement: impl Into<String>,
        subject: impl Into<String>,
        speaker: impl Into<String>,
        label: i64,
    ) -> Self {
        Self {
            statement: statement.into(),
            subject: subject.into(),
            speaker: speaker.into(),
            label,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an additional source field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The string that gets chunked: statement, subject and speaker joined by `separator`.
    pub fn context_string(&self, separator: &str) -> String {
        [
            self.statement.as_str(),
            self.subject.as_str(),
            self.speaker.as_str(),
        ]
        .join(separator)
    }
}
