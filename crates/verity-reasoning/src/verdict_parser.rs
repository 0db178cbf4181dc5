//! Reduces the model's free-text reply to a [`Verdict`].
//!
//! `Conclusion` mode reads the answer after the last `final answer:` marker,
//! falling back to the last verdict keyword in the whole reply. Negated
//! keywords ("not true", "isn't fake") count as the opposite verdict.
//! `Keyword` mode is the plain rule: any "true" substring means true.

use verity_core::config::VerdictParsing;
use verity_core::errors::InterpretationError;
use verity_core::models::Verdict;

const FINAL_ANSWER_MARKER: &str = "final answer:";
const EXCERPT_CHARS: usize = 120;

pub fn parse_verdict(response: &str, mode: VerdictParsing) -> Result<Verdict, InterpretationError> {
    let lowered = response.trim().to_lowercase().replace('\u{2019}', "'");
    if lowered.is_empty() {
        return Err(InterpretationError::MalformedResponse {
            reason: "empty completion".to_string(),
        });
    }

    match mode {
        VerdictParsing::Keyword => Ok(if lowered.contains("true") {
            Verdict::True
        } else {
            Verdict::Fake
        }),
        VerdictParsing::Conclusion => {
            let from_marker = lowered
                .rfind(FINAL_ANSWER_MARKER)
                .and_then(|pos| first_verdict(&lowered[pos + FINAL_ANSWER_MARKER.len()..]));
            from_marker
                .or_else(|| last_verdict(&lowered))
                .ok_or_else(|| InterpretationError::UnparseableVerdict {
                    excerpt: lowered.chars().take(EXCERPT_CHARS).collect(),
                })
        }
    }
}

fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .collect()
}

fn keyword(token: &str) -> Option<Verdict> {
    match token {
        "true" => Some(Verdict::True),
        "fake" | "false" | "untrue" => Some(Verdict::Fake),
        _ => None,
    }
}

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "never" | "no") || token.ends_with("n't")
}

fn flip(v: Verdict) -> Verdict {
    match v {
        Verdict::True => Verdict::Fake,
        Verdict::Fake => Verdict::True,
    }
}

/// Verdicts in reading order, with negation applied.
fn verdicts(text: &str) -> Vec<Verdict> {
    let toks = tokens(text);
    toks.iter()
        .enumerate()
        .filter_map(|(i, t)| {
            let v = keyword(t)?;
            let negated = i > 0 && is_negation(toks[i - 1]);
            Some(if negated { flip(v) } else { v })
        })
        .collect()
}

fn first_verdict(text: &str) -> Option<Verdict> {
    verdicts(text).first().copied()
}

fn last_verdict(text: &str) -> Option<Verdict> {
    verdicts(text).last().copied()
}
