//! Recursive character splitting of record context strings.
//!
//! Separators are tried coarsest first and stay attached to the piece they
//! end, so sentence terminators survive. Pieces that still exceed the chunk
//! size are split again with the next finer separator; the resulting units are
//! merged back greedily, carrying up to `chunk_overlap` characters of trailing
//! text into the next chunk. All lengths are in chars.

use std::collections::VecDeque;

use tracing::debug;
use verity_core::config::ChunkingConfig;
use verity_core::errors::VerityResult;
use verity_core::models::{Chunk, Record};

/// Paragraph, line, sentence, word, character.
pub const DEFAULT_SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
    context_separator: String,
}

impl Chunker {
    /// Validates the parameters up front; an invalid size/overlap pair never
    /// reaches the splitting code.
    pub fn new(config: &ChunkingConfig) -> VerityResult<Self> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            context_separator: config.context_separator.clone(),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split one record's context string. Every chunk carries the full record.
    pub fn chunk(&self, record: &Record) -> Vec<Chunk> {
        let context = record.context_string(&self.context_separator);
        self.split_text(&context)
            .into_iter()
            .map(|text| Chunk::new(text, record.clone()))
            .collect()
    }

    /// Chunk every record, preserving record order.
    pub fn chunk_all(&self, records: &[Record]) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = records.iter().flat_map(|r| self.chunk(r)).collect();
        debug!(records = records.len(), chunks = chunks.len(), "records chunked");
        chunks
    }

    /// Split raw text into chunks of at most `chunk_size` chars.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }
        let mut units = Vec::new();
        self.split_recursive(text, &DEFAULT_SEPARATORS, &mut units);
        self.merge_units(&units)
    }

    /// Break `text` into units whose trimmed length fits the chunk size.
    /// Each unit keeps its trailing separator, so joining units with no
    /// separator reproduces the text.
    fn split_recursive<'t>(&self, text: &'t str, separators: &[&str], out: &mut Vec<&'t str>) {
        // Coarsest separator present in the text; "" always matches.
        let mut separator = "";
        let mut finer: &[&str] = &[];
        for (i, &sep) in separators.iter().enumerate() {
            if sep.is_empty() || text.contains(sep) {
                separator = sep;
                finer = &separators[i + 1..];
                break;
            }
        }

        let pieces: Vec<&'t str> = if separator.is_empty() {
            text.char_indices()
                .map(|(i, ch)| &text[i..i + ch.len_utf8()])
                .collect()
        } else {
            text.split_inclusive(separator).collect()
        };

        for piece in pieces {
            if body_len(piece) <= self.chunk_size || finer.is_empty() {
                out.push(piece);
            } else {
                self.split_recursive(piece, finer, out);
            }
        }
    }

    /// Greedy merge of units up to `chunk_size`. Each new chunk starts with
    /// trailing units of the previous one totalling at most `chunk_overlap`
    /// chars; when a whole unit is too long to carry, its trailing words are
    /// carried instead.
    fn merge_units(&self, units: &[&str]) -> Vec<String> {
        let mut docs = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &unit in units {
            let body = body_len(unit);
            if total + body > self.chunk_size && !current.is_empty() {
                push_doc(&mut docs, &current);

                let mut dropped = None;
                while total > self.chunk_overlap || (total > 0 && total + body > self.chunk_size) {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= char_len(front);
                    dropped = Some(front);
                }

                let budget = self
                    .chunk_overlap
                    .saturating_sub(total)
                    .min(self.chunk_size.saturating_sub(total + body));
                if let Some(tail) = dropped.and_then(|d| word_tail(d, budget)) {
                    total += char_len(tail);
                    current.push_front(tail);
                }
            }

            total += char_len(unit);
            current.push_back(unit);
        }
        push_doc(&mut docs, &current);
        docs
    }
}

fn push_doc(docs: &mut Vec<String>, units: &VecDeque<&str>) {
    let joined: String = units.iter().copied().collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        docs.push(trimmed.to_string());
    }
}

/// Longest suffix of `unit` starting at a word that fits in `budget` chars.
fn word_tail(unit: &str, budget: usize) -> Option<&str> {
    if budget == 0 {
        return None;
    }
    let mut remaining = char_len(unit);
    let mut after_space = false;
    for (i, ch) in unit.char_indices() {
        if after_space && !ch.is_whitespace() && remaining <= budget {
            return Some(&unit[i..]);
        }
        after_space = ch.is_whitespace();
        remaining -= 1;
    }
    None
}

/// Length a unit contributes when it ends a chunk.
fn body_len(unit: &str) -> usize {
    char_len(unit.trim_end())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
