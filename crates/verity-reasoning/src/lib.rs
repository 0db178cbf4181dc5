//! # verity-reasoning
//!
//! Turns retrieved evidence into a verdict.
//!
//! ```text
//! Predictor ── query ──► IRetriever ──► RetrievalResult
//!     │                                      │
//!     └──────────────► EvidenceInterpreter ◄─┘
//!                        ├── LabelPolicy (label → true/fake tag)
//!                        ├── preview truncation
//!                        ├── prompt assembly
//!                        ├── IReasoningBackend (ChatCompletionsBackend)
//!                        └── verdict parser
//! ```

pub mod backend;
pub mod interpreter;
pub mod labels;
pub mod predictor;
pub mod preview;
pub mod prompt;
pub mod verdict_parser;

pub use backend::ChatCompletionsBackend;
pub use interpreter::EvidenceInterpreter;
pub use labels::LabelPolicy;
pub use predictor::{Prediction, Predictor};
pub use preview::truncate_preview;
pub use verdict_parser::parse_verdict;
