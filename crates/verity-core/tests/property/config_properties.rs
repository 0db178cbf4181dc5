use proptest::prelude::*;
use verity_core::config::*;
use verity_core::errors::{ConfigurationError, VerityError};
use verity_core::models::DistanceMetric;

fn chunking() -> impl Strategy<Value = ChunkingConfig> {
    (1usize..10_000)
        .prop_flat_map(|size| (Just(size), 0..size, "[ -~]{1,5}"))
        .prop_map(|(chunk_size, chunk_overlap, context_separator)| ChunkingConfig {
            chunk_size,
            chunk_overlap,
            context_separator,
        })
}

fn boundary() -> impl Strategy<Value = PreviewBoundary> {
    prop_oneof![Just(PreviewBoundary::Hard), Just(PreviewBoundary::Sentence)]
}

fn parsing() -> impl Strategy<Value = VerdictParsing> {
    prop_oneof![Just(VerdictParsing::Conclusion), Just(VerdictParsing::Keyword)]
}

fn metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![Just(DistanceMetric::L2), Just(DistanceMetric::Cosine)]
}

proptest! {
    #[test]
    fn valid_config_survives_a_toml_round_trip(
        chunking in chunking(),
        model in "[a-z0-9][a-z0-9.:-]{0,20}",
        cutoff in -10i64..10,
        preview_chars in 1usize..2_000,
        boundary in boundary(),
        parsing in parsing(),
        timeout_ms in 1u64..600_000,
        max_retries in 0u32..10,
        temperature in prop::option::of(0.0f32..2.0),
        metric in metric(),
        dimensions in 1usize..4_096,
    ) {
        let mut config = VerityConfig::default();
        config.chunking = chunking;
        config.reasoning.model = model;
        config.reasoning.true_label_cutoff = cutoff;
        config.reasoning.preview_chars = preview_chars;
        config.reasoning.preview_boundary = boundary;
        config.reasoning.verdict_parsing = parsing;
        config.reasoning.timeout_ms = timeout_ms;
        config.reasoning.max_retries = max_retries;
        config.reasoning.temperature = temperature;
        config.index.metric = metric;
        config.embedding.dimensions = dimensions;

        let text = config.to_toml_string().unwrap();
        let parsed = VerityConfig::from_toml(&text).unwrap();

        prop_assert_eq!(&parsed.chunking, &config.chunking);
        prop_assert_eq!(&parsed.reasoning.model, &config.reasoning.model);
        prop_assert_eq!(parsed.reasoning.true_label_cutoff, cutoff);
        prop_assert_eq!(parsed.reasoning.preview_chars, preview_chars);
        prop_assert_eq!(parsed.reasoning.preview_boundary, boundary);
        prop_assert_eq!(parsed.reasoning.verdict_parsing, parsing);
        prop_assert_eq!(parsed.reasoning.timeout_ms, timeout_ms);
        prop_assert_eq!(parsed.reasoning.max_retries, max_retries);
        prop_assert_eq!(parsed.reasoning.temperature, temperature);
        prop_assert_eq!(parsed.index.metric, metric);
        prop_assert_eq!(parsed.embedding.dimensions, dimensions);
    }

    #[test]
    fn overlap_reaching_chunk_size_is_rejected(
        size in 1usize..10_000,
        extra in 0usize..100,
    ) {
        let overlap = size + extra;
        let text = format!("[chunking]\nchunk_size = {size}\nchunk_overlap = {overlap}\n");
        match VerityConfig::from_toml(&text) {
            Err(VerityError::Configuration(ConfigurationError::OverlapTooLarge { size: s, overlap: o })) => {
                prop_assert_eq!((s, o), (size, overlap));
            }
            other => prop_assert!(false, "expected OverlapTooLarge, got {:?}", other),
        }
    }
}
