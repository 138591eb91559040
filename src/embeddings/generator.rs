//! Bounded-concurrency embedding generation.

use crate::embeddings::Embedder;
use crate::types::WordEmbedding;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Counts for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Words submitted.
    pub total: usize,
    /// Attempts completed, success or failure.
    pub completed: usize,
    /// Attempts that failed and were dropped from the result.
    pub failed: usize,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

/// Observer invoked after every completed attempt with (completed, total).
pub type ProgressObserver = dyn Fn(usize, usize) + Send + Sync;

/// Drives a bounded pool of concurrent `Embedder` calls over a word list.
///
/// One task is spawned per word but at most `concurrency` execute at once;
/// the rest wait on the admission gate. Successful (word, vector) pairs land
/// in a shared accumulator keyed by word, so duplicate words overwrite with
/// no ordering guarantee. `generate` returns only after every task has
/// finished.
pub struct EmbeddingGenerator {
    embedder: Arc<dyn Embedder>,
    concurrency: usize,
    progress: Option<Arc<ProgressObserver>>,
    cancel: CancellationToken,
}

impl EmbeddingGenerator {
    /// Create a generator admitting at most `concurrency` in-flight requests.
    pub fn new(embedder: Arc<dyn Embedder>, concurrency: usize) -> Self {
        Self {
            embedder,
            concurrency: concurrency.max(1),
            progress: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a progress observer, called after each completed attempt.
    pub fn with_progress(
        mut self,
        observer: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.progress = Some(Arc::new(observer));
        self
    }

    /// Attach a cancellation token.
    ///
    /// Cancelling stops admitting new words and unblocks tasks waiting on the
    /// gate; in-flight requests finish and the final join still runs.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Generate embeddings for `words`.
    ///
    /// The result contains exactly the words for which the embedder
    /// succeeded, in no particular order. Per-word failures are logged and
    /// dropped; they never fail the batch.
    pub async fn generate(&self, words: Vec<String>) -> (Vec<WordEmbedding>, GenerationSummary) {
        let started = Instant::now();
        let total = words.len();

        let gate = Arc::new(Semaphore::new(self.concurrency));
        let results: Arc<Mutex<HashMap<String, Vec<f32>>>> =
            Arc::new(Mutex::new(HashMap::with_capacity(total)));
        let completed = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let mut tasks = JoinSet::new();
        for word in words {
            let gate = Arc::clone(&gate);
            let results = Arc::clone(&results);
            let completed = Arc::clone(&completed);
            let failed = Arc::clone(&failed);
            let embedder = Arc::clone(&self.embedder);
            let progress = self.progress.clone();
            let cancel = self.cancel.clone();

            tasks.spawn(async move {
                if cancel.is_cancelled() {
                    return;
                }
                let _permit = tokio::select! {
                    _ = cancel.cancelled() => return,
                    permit = gate.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return,
                    },
                };

                match embedder.fetch(&word).await {
                    Ok(embedding) => {
                        results.lock().await.insert(word, embedding);
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(error = %e, "embedding request failed");
                    }
                }

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(observer) = &progress {
                    observer(done, total);
                }
            });
        }

        while tasks.join_next().await.is_some() {}

        let pairs: Vec<WordEmbedding> = results
            .lock()
            .await
            .drain()
            .map(|(word, embedding)| WordEmbedding { word, embedding })
            .collect();

        let summary = GenerationSummary {
            total,
            completed: completed.load(Ordering::SeqCst),
            failed: failed.load(Ordering::SeqCst),
            elapsed: started.elapsed(),
        };

        tracing::info!(
            total = summary.total,
            completed = summary.completed,
            failed = summary.failed,
            "embedding generation finished"
        );

        (pairs, summary)
    }
}
