use proptest::prelude::*;
use verity_core::config::ChunkingConfig;
use verity_retrieval::Chunker;

fn size_and_overlap() -> impl Strategy<Value = (usize, usize)> {
    (1usize..80).prop_flat_map(|size| (Just(size), 0..size))
}

/// Space-separated words made unique by an index suffix, so carried-over
/// words can be told apart from accidental repeats.
fn unique_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 1..60).prop_map(|words| {
        words
            .into_iter()
            .enumerate()
            .map(|(i, w)| format!("{w}{i}"))
            .collect()
    })
}

fn chunker(size: usize, overlap: usize) -> Chunker {
    Chunker::new(&ChunkingConfig::new(size, overlap)).unwrap()
}

proptest! {
    #[test]
    fn chunks_never_exceed_chunk_size(
        (size, overlap) in size_and_overlap(),
        text in "[a-zé .\n]{0,300}",
    ) {
        for chunk in chunker(size, overlap).split_text(&text) {
            prop_assert!(
                chunk.chars().count() <= size,
                "chunk of {} chars exceeds size {}: {:?}",
                chunk.chars().count(), size, chunk
            );
        }
    }

    #[test]
    fn text_within_size_is_one_identical_chunk(
        text in ".{1,60}",
        extra in 0usize..20,
    ) {
        let size = text.chars().count() + extra;
        let chunks = chunker(size, 0).split_text(&text);
        prop_assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn every_word_survives_in_order(
        words in unique_words(),
        size in 12usize..80,
        overlap_ratio in 0.0f64..0.9,
    ) {
        let overlap = ((size as f64) * overlap_ratio) as usize;
        let text = words.join(" ");
        let chunks = chunker(size, overlap).split_text(&text);

        let mut seen: Vec<&str> = Vec::new();
        for chunk in &chunks {
            for w in chunk.split(' ') {
                if !seen.contains(&w) {
                    seen.push(w);
                }
            }
        }
        let expected: Vec<&str> = words.iter().map(String::as_str).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn carried_overlap_never_exceeds_chunk_overlap(
        words in unique_words(),
        size in 12usize..80,
        overlap_ratio in 0.0f64..0.9,
    ) {
        let overlap = ((size as f64) * overlap_ratio) as usize;
        let chunks = chunker(size, overlap).split_text(&words.join(" "));

        for pair in chunks.windows(2) {
            let prev: Vec<&str> = pair[0].split(' ').collect();
            let next: Vec<&str> = pair[1].split(' ').collect();
            let carried = (0..=next.len().min(prev.len()))
                .rev()
                .find(|&j| prev.ends_with(&next[..j]))
                .unwrap_or(0);
            let carried_chars = next[..carried].join(" ").chars().count();
            prop_assert!(
                carried_chars <= overlap,
                "carried {:?} ({} chars) with overlap {}",
                &next[..carried], carried_chars, overlap
            );
        }
    }

    #[test]
    fn adjacent_chunks_carry_close_to_chunk_overlap(
        words in unique_words(),
        size in 12usize..80,
        overlap_ratio in 0.0f64..0.9,
    ) {
        let overlap = ((size as f64) * overlap_ratio) as usize;
        let longest = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        // The carry can fall short by at most one word plus its space, and
        // must leave room for the word that opens the next chunk.
        let floor = overlap.min(size - longest).saturating_sub(longest + 1);
        let chunks = chunker(size, overlap).split_text(&words.join(" "));

        for pair in chunks.windows(2) {
            let prev: Vec<&str> = pair[0].split(' ').collect();
            let next: Vec<&str> = pair[1].split(' ').collect();
            let carried = (0..=next.len().min(prev.len()))
                .rev()
                .find(|&j| prev.ends_with(&next[..j]))
                .unwrap_or(0);
            let carried_chars = next[..carried].join(" ").chars().count();
            prop_assert!(
                carried_chars >= floor,
                "carried {:?} ({} chars), expected at least {} with overlap {}",
                &next[..carried], carried_chars, floor, overlap
            );
        }
    }

    #[test]
    fn sentence_punctuation_is_kept(
        sentences in prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,5}", 2..12),
        size in 20usize..60,
        overlap_ratio in 0.0f64..0.6,
    ) {
        let overlap = ((size as f64) * overlap_ratio) as usize;
        let text = sentences
            .iter()
            .map(|s| format!("{s}."))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunker(size, overlap).split_text(&text);
        let periods = |s: &str| s.matches('.').count();
        let total: usize = chunks.iter().map(|c| periods(c.as_str())).sum();
        prop_assert!(total >= periods(text.as_str()), "periods lost in {:?}", chunks);
    }

    #[test]
    fn splitting_is_deterministic(
        (size, overlap) in size_and_overlap(),
        text in ".{0,200}",
    ) {
        let c = chunker(size, overlap);
        prop_assert_eq!(c.split_text(&text), c.split_text(&text));
    }
}
