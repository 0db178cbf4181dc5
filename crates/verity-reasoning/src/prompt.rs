//! Chat messages sent to the reasoning backend.

use verity_core::config::VerdictParsing;
use verity_core::models::{ChatMessage, EvidenceTag};

pub const SYSTEM_PROMPT: &str = "You are an assistant that verifies if a news is fake or true by analyzing retrieved evidence step-by-step. \
Consider each document separately. \
For each document, analyze the content and label it as supporting truth or indicating falsehood. \
Finally, based on the analysis of all documents, determine if the news is likely true or fake.";

const EVIDENCE_HEADER: &str = "Here are the documents retrieved for this news:\n\n";

const CLOSING_INSTRUCTION: &str = "Analyze each document and decide if it supports the truthfulness of the news or suggests it might be fake. \
After reviewing each document, provide a final conclusion on whether the news is likely true or fake.";

/// Appended in [`VerdictParsing::Conclusion`] mode so the parser has a fixed
/// line to look for.
pub const FINAL_ANSWER_INSTRUCTION: &str =
    "End your reply with a last line of exactly \"Final answer: TRUE\" or \"Final answer: FAKE\".";

/// One retrieved document as presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceLine<'a> {
    pub tag: EvidenceTag,
    pub preview: &'a str,
}

/// The user turn: numbered documents with their tags, then the instructions.
pub fn user_prompt(evidence: &[EvidenceLine<'_>], parsing: VerdictParsing) -> String {
    let mut prompt = String::from(EVIDENCE_HEADER);
    for (i, line) in evidence.iter().enumerate() {
        prompt.push_str(&format!(
            "Document {} (Label: {}): {}\n\n",
            i + 1,
            line.tag.as_label(),
            line.preview
        ));
    }
    prompt.push_str(CLOSING_INSTRUCTION);
    if parsing == VerdictParsing::Conclusion {
        prompt.push(' ');
        prompt.push_str(FINAL_ANSWER_INSTRUCTION);
    }
    prompt
}

/// System and user messages for one interpretation.
pub fn build_messages(evidence: &[EvidenceLine<'_>], parsing: VerdictParsing) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_prompt(evidence, parsing)),
    ]
}
