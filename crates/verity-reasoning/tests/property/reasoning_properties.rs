use proptest::prelude::*;
use verity_core::config::{PreviewBoundary, VerdictParsing};
use verity_core::models::{EvidenceTag, Verdict};
use verity_reasoning::{parse_verdict, truncate_preview, LabelPolicy};

fn boundary() -> impl Strategy<Value = PreviewBoundary> {
    prop_oneof![Just(PreviewBoundary::Hard), Just(PreviewBoundary::Sentence)]
}

proptest! {
    #[test]
    fn higher_labels_never_lose_truth(cutoff in -5i64..10, a in -10i64..20, b in -10i64..20) {
        let policy = LabelPolicy::new(cutoff);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if policy.tag(lo) == EvidenceTag::SupportsTruth {
            prop_assert_eq!(policy.tag(hi), EvidenceTag::SupportsTruth);
        }
    }

    #[test]
    fn preview_is_a_bounded_prefix(
        text in ".{0,300}",
        limit in 1usize..250,
        boundary in boundary(),
    ) {
        let preview = truncate_preview(&text, limit, boundary);
        prop_assert!(preview.chars().count() <= limit);
        prop_assert!(text.starts_with(preview));
        if text.chars().count() <= limit {
            prop_assert_eq!(preview, text.as_str());
        }
    }

    #[test]
    fn keyword_mode_matches_substring_rule(reply in "[a-zA-Z .]{1,80}") {
        prop_assume!(!reply.trim().is_empty());
        let expected = if reply.to_lowercase().contains("true") { Verdict::True } else { Verdict::Fake };
        prop_assert_eq!(parse_verdict(&reply, VerdictParsing::Keyword).unwrap(), expected);
    }

    #[test]
    fn explicit_final_answer_is_always_honoured(
        preamble in "[a-z .]{0,120}",
        answer_true in any::<bool>(),
    ) {
        let answer = if answer_true { "TRUE" } else { "FAKE" };
        let reply = format!("{preamble}\nFinal answer: {answer}");
        let expected = if answer_true { Verdict::True } else { Verdict::Fake };
        prop_assert_eq!(parse_verdict(&reply, VerdictParsing::Conclusion).unwrap(), expected);
    }
}
