//! Loader behavior over a mock store.

use async_trait::async_trait;
use lexivec::{BulkLoader, PipelineError, Result, SimilarityMatch, VectorStore, WordEmbedding};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Store that records every insert attempt and fails for a listed subset.
struct MockStore {
    fail_words: HashSet<String>,
    attempts: AtomicUsize,
    inserted: Mutex<Vec<String>>,
}

impl MockStore {
    fn new(fail_words: &[&str]) -> Self {
        Self {
            fail_words: fail_words.iter().map(|w| w.to_string()).collect(),
            attempts: AtomicUsize::new(0),
            inserted: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorStore for MockStore {
    async fn insert(&self, word: &str, embedding: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        assert!(
            embedding.starts_with('[') && embedding.ends_with(']'),
            "worker must hand the store a vector literal, got '{}'",
            embedding
        );
        if self.fail_words.contains(word) {
            return Err(PipelineError::Insert {
                word: word.to_string(),
                reason: "mock failure".to_string(),
            });
        }
        self.inserted.lock().unwrap().push(word.to_string());
        Ok(())
    }

    async fn nearest(&self, _embedding: &str, _limit: i64) -> Result<Vec<SimilarityMatch>> {
        unimplemented!("not used by loader tests")
    }
}

fn records(n: usize) -> Vec<WordEmbedding> {
    (0..n)
        .map(|i| WordEmbedding::new(format!("word{}", i), vec![i as f32, 1.0]))
        .collect()
}

#[tokio::test]
async fn every_record_gets_one_insert_attempt() {
    let store = Arc::new(MockStore::new(&[]));
    let loader = BulkLoader::new(3);

    let summary = loader.load_records(records(10), store.clone()).await.unwrap();

    assert_eq!(store.attempts(), 10);
    assert_eq!(summary.attempted, 10);
    assert_eq!(summary.inserted, 10);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn insert_failures_never_fail_the_run() {
    let store = Arc::new(MockStore::new(&["word3", "word6"]));
    let loader = BulkLoader::new(3);

    let summary = loader.load_records(records(10), store.clone()).await.unwrap();

    assert_eq!(store.attempts(), 10);
    assert_eq!(summary.inserted, 8);
    assert_eq!(summary.failed, 2);

    let inserted = store.inserted.lock().unwrap();
    assert!(!inserted.contains(&"word3".to_string()));
    assert!(!inserted.contains(&"word6".to_string()));
}

#[tokio::test]
async fn source_failure_surfaces_after_drain() {
    let store = Arc::new(MockStore::new(&[]));
    let loader = BulkLoader::new(2);

    let source: Vec<Result<WordEmbedding>> = vec![
        Ok(WordEmbedding::new("cat", vec![1.0, 0.0])),
        Ok(WordEmbedding::new("dog", vec![0.0, 1.0])),
        Err(PipelineError::Source("stream broke".to_string())),
        Ok(WordEmbedding::new("fox", vec![0.9, 0.1])),
    ];

    let err = loader.load(source, store.clone()).await.unwrap_err();

    assert!(matches!(err, PipelineError::Source(_)));
    // records before the failure were still drained and inserted
    assert_eq!(store.attempts(), 2);
}

#[tokio::test]
async fn malformed_records_are_skipped() {
    let store = Arc::new(MockStore::new(&[]));
    let loader = BulkLoader::new(2);

    let source: Vec<Result<WordEmbedding>> = vec![
        Ok(WordEmbedding::new("cat", vec![1.0, 0.0])),
        Err(PipelineError::Parse("line 2: bad json".to_string())),
        Ok(WordEmbedding::new("dog", vec![0.0, 1.0])),
    ];

    let summary = loader.load(source, store.clone()).await.unwrap();

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(store.attempts(), 2);
}

#[tokio::test]
async fn single_worker_drains_everything() {
    let store = Arc::new(MockStore::new(&[]));
    let loader = BulkLoader::new(1);

    let summary = loader.load_records(records(25), store.clone()).await.unwrap();

    assert_eq!(store.attempts(), 25);
    assert_eq!(summary.inserted, 25);
}
