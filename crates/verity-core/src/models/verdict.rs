use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary classification of a news item. Serialized as `1` (true) / `0` (fake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Verdict {
    Fake,
    True,
}

impl Verdict {
    pub fn as_int(self) -> u8 {
        match self {
            Self::Fake => 0,
            Self::True => 1,
        }
    }
}

impl From<Verdict> for u8 {
    fn from(v: Verdict) -> Self {
        v.as_int()
    }
}

impl TryFrom<u8> for Verdict {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Fake),
            1 => Ok(Self::True),
            other => Err(format!("verdict must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fake => f.write_str("fake"),
            Self::True => f.write_str("true"),
        }
    }
}

/// What a retrieved document's label says about truthfulness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceTag {
    SupportsTruth,
    IndicatesFalsehood,
}

impl EvidenceTag {
    /// The word shown to the reasoning model.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::SupportsTruth => "true",
            Self::IndicatesFalsehood => "fake",
        }
    }
}
