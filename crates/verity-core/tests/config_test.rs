use verity_core::config::*;
use verity_core::errors::{ConfigurationError, VerityError};
use verity_core::models::DistanceMetric;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = VerityConfig::from_toml("").unwrap();

    // Chunking defaults
    assert_eq!(config.chunking.chunk_size, 500);
    assert_eq!(config.chunking.chunk_overlap, 50);
    assert_eq!(config.chunking.context_separator, " - ");

    // Embedding defaults
    assert_eq!(config.embedding.provider, "hashing");
    assert_eq!(config.embedding.model, "sentence-transformers/all-mpnet-base-v2");
    assert_eq!(config.embedding.dimensions, 768);
    assert_eq!(config.embedding.batch_size, 32);
    assert!(config.embedding.parallel_build);

    // Index defaults
    assert_eq!(config.index.metric, DistanceMetric::L2);
    assert!(config.index.verify_model_on_load);

    // Reasoning defaults
    assert_eq!(config.reasoning.model, "llama3-8b-8192");
    assert_eq!(config.reasoning.api_key_env, "GROQ_KEY");
    assert_eq!(config.reasoning.true_label_cutoff, 3);
    assert_eq!(config.reasoning.preview_chars, 200);
    assert_eq!(config.reasoning.preview_boundary, PreviewBoundary::Sentence);
    assert_eq!(config.reasoning.verdict_parsing, VerdictParsing::Conclusion);
    assert_eq!(config.reasoning.max_retries, 0);
    assert_eq!(config.reasoning.default_k, 5);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[chunking]
chunk_size = 200

[index]
metric = "cosine"

[reasoning]
verdict_parsing = "keyword"
preview_boundary = "hard"
max_retries = 2
"#;
    let config = VerityConfig::from_toml(toml).unwrap();
    assert_eq!(config.chunking.chunk_size, 200);
    // Non-overridden fields keep defaults
    assert_eq!(config.chunking.chunk_overlap, 50);
    assert_eq!(config.index.metric, DistanceMetric::Cosine);
    assert_eq!(config.reasoning.verdict_parsing, VerdictParsing::Keyword);
    assert_eq!(config.reasoning.preview_boundary, PreviewBoundary::Hard);
    assert_eq!(config.reasoning.max_retries, 2);
    assert_eq!(config.reasoning.timeout_ms, 60_000); // default
}

#[test]
fn config_serde_roundtrip() {
    let config = VerityConfig::default();
    let toml_str = config.to_toml_string().unwrap();
    let roundtripped = VerityConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.chunking, config.chunking);
    assert_eq!(roundtripped.embedding.dimensions, config.embedding.dimensions);
    assert_eq!(roundtripped.reasoning.endpoint, config.reasoning.endpoint);
}

#[test]
fn overlap_not_smaller_than_size_fails_fast() {
    let toml = r#"
[chunking]
chunk_size = 100
chunk_overlap = 100
"#;
    let err = VerityConfig::from_toml(toml).unwrap_err();
    assert!(matches!(
        err,
        VerityError::Configuration(ConfigurationError::OverlapTooLarge {
            size: 100,
            overlap: 100
        })
    ));
}

#[test]
fn zero_chunk_size_is_rejected() {
    let err = ChunkingConfig::new(0, 0).validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::ZeroChunkSize));
}

#[test]
fn zero_dimensions_are_rejected() {
    let err = VerityConfig::from_toml("[embedding]\ndimensions = 0\n").unwrap_err();
    assert!(err.to_string().contains("embedding.dimensions"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = VerityConfig::from_toml("[chunking\nchunk_size = ").unwrap_err();
    assert!(matches!(
        err,
        VerityError::Configuration(ConfigurationError::Parse { .. })
    ));
}

#[test]
fn load_reads_a_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verity.toml");
    std::fs::write(&path, "[reasoning]\ntrue_label_cutoff = 0\n").unwrap();
    let config = VerityConfig::load(&path).unwrap();
    assert_eq!(config.reasoning.true_label_cutoff, 0);
}

#[test]
fn load_of_missing_file_reports_path() {
    let err = VerityConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}
