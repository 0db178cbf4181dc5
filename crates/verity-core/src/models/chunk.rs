use serde::{Deserialize, Serialize};

use super::Record;

/// A bounded-length window of a record's context string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    /// The full record this chunk was cut from.
    pub metadata: Record,
}

impl Chunk {
    pub fn new(text: impl Into<String>, metadata: Record) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Truth label of the source record.
    pub fn label(&self) -> i64 {
        self.metadata.label
    }
}
