use std::sync::Arc;
use std::thread;

use verity_core::config::{EmbeddingConfig, VerityConfig};
use verity_core::errors::{PersistenceError, RetrievalError, VerityError};
use verity_core::models::Record;
use verity_core::traits::IRetriever;
use verity_embeddings::EmbeddingEngine;
use verity_retrieval::Retriever;

fn engine() -> Arc<EmbeddingEngine> {
    Arc::new(
        EmbeddingEngine::new(EmbeddingConfig {
            dimensions: 128,
            ..Default::default()
        })
        .unwrap(),
    )
}

fn retriever_with(config: &VerityConfig) -> Retriever {
    Retriever::new(engine(), config).unwrap()
}

fn retriever() -> Retriever {
    retriever_with(&VerityConfig::default())
}

#[test]
fn single_short_record_is_one_chunk_and_found() {
    let r = retriever();
    let index = r
        .build_from_records(&[Record::new("Taxes increased", "", "", 5)])
        .unwrap();
    assert_eq!(index.len(), 1);

    let result = r.search("Taxes increased", 1).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.hits[0].chunk.metadata.statement, "Taxes increased");
    assert_eq!(result.hits[0].chunk.label(), 5);
}

#[test]
fn missing_path_leaves_index_unset() {
    let r = retriever();
    let dir = tempfile::tempdir().unwrap();
    let err = r.load(dir.path().join("does-not-exist")).unwrap_err();
    assert!(matches!(
        err,
        VerityError::Persistence(PersistenceError::NotFound { .. })
    ));
    assert!(!r.is_loaded());
    assert!(matches!(
        r.search("Taxes increased", 1).unwrap_err(),
        VerityError::Retrieval(RetrievalError::IndexNotLoaded)
    ));
}

#[test]
fn failed_load_keeps_the_previous_index() {
    let r = retriever();
    let built = r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    assert!(r.load(dir.path().join("missing")).is_err());
    assert_eq!(r.active_index().unwrap().index_id(), built.index_id());
    assert!(!r.search("taxes", 2).unwrap().is_empty());
}

#[test]
fn results_are_bounded_by_k_and_index_size() {
    let r = retriever();
    let index = r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    for k in [1, 3, index.len(), index.len() + 5] {
        let result = r.search("income taxes for families", k).unwrap();
        assert!(result.len() <= k.min(index.len()));
        assert_eq!(result.len(), k.min(index.len()));
    }
}

#[test]
fn results_are_sorted_nearest_first() {
    let r = retriever();
    r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    let result = r.search("unemployment and the jobs program", 6).unwrap();
    for pair in result.hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
        if pair[0].distance == pair[1].distance {
            assert!(pair[0].position < pair[1].position);
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let r = retriever();
    r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    let first = r.search("crime doubled after police funding cuts", 4).unwrap();
    for _ in 0..5 {
        assert_eq!(r.search("crime doubled after police funding cuts", 4).unwrap(), first);
    }
}

#[test]
fn topical_query_finds_matching_record() {
    let r = retriever();
    r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    let result = r
        .search("The governor cut income taxes for every household", 1)
        .unwrap();
    assert_eq!(result.hits[0].chunk.metadata.speaker, "governor");
}

#[test]
fn long_statement_is_split_into_overlapping_chunks() {
    let mut config = VerityConfig::default();
    config.chunking.chunk_size = 80;
    config.chunking.chunk_overlap = 20;
    let r = retriever_with(&config);
    let records = test_fixtures::liar_sample();
    let index = r.build_from_records(&records).unwrap();
    assert!(index.len() > records.len());

    let crime_chunks: Vec<_> = index
        .chunks()
        .iter()
        .filter(|c| c.metadata.speaker == "council-member")
        .collect();
    assert!(crime_chunks.len() > 1);
    assert!(crime_chunks.iter().all(|c| c.text.chars().count() <= 80));
    assert!(crime_chunks.iter().all(|c| c.metadata.extra["id"] == "7004.json"));
}

#[test]
fn usable_through_the_trait_object() {
    let r = retriever();
    r.build_from_records(&test_fixtures::liar_sample()).unwrap();
    let dyn_retriever: Arc<dyn IRetriever> = Arc::new(r);
    assert_eq!(dyn_retriever.search("coal and natural gas", 2).unwrap().len(), 2);
}

#[test]
fn searches_run_concurrently_with_index_swaps() {
    let r = Arc::new(retriever());
    let records = test_fixtures::liar_sample();
    r.build_from_records(&records).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                for j in 0..50 {
                    let result = r.search(&format!("taxes jobs crime {i} {j}"), 3).unwrap();
                    assert!(!result.is_empty() && result.len() <= 3);
                }
            })
        })
        .collect();

    for n in 1..=10 {
        let subset = &records[..(n % records.len()).max(1)];
        r.build_from_records(subset).unwrap();
    }

    for handle in readers {
        handle.join().unwrap();
    }
    assert!(r.is_loaded());
}
