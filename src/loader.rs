//! Bulk loading of embedding records into the vector store.

use crate::codec;
use crate::store::VectorStore;
use crate::types::{PipelineError, Result, WordEmbedding};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Queue capacity between the producer and the insert workers. Fixed, not a
/// multiple of the worker count.
const QUEUE_CAPACITY: usize = 100;

/// Counts for one load run.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Records handed to workers (one insert attempt each).
    pub attempted: usize,
    /// Rows successfully inserted.
    pub inserted: usize,
    /// Inserts that failed and were skipped.
    pub failed: usize,
    /// Malformed source records skipped before enqueueing.
    pub skipped: usize,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

/// Drains a record source into the store through a bounded worker pool.
///
/// A single producer pushes records onto a bounded queue; `workers` consumers
/// take one record at a time, encode the embedding and issue one insert each.
/// Insert failures are logged and tolerated: a partial-failure run still
/// reports overall success, and only the summary counts reveal it. Failures
/// reading the source itself are fatal, but surface only after the queue has
/// drained and every worker has exited.
pub struct BulkLoader {
    workers: usize,
    cancel: CancellationToken,
}

impl BulkLoader {
    /// Create a loader with `workers` concurrent insert workers.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token.
    ///
    /// Cancelling stops producing new records; queued records drain and the
    /// final join still runs.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Load every record from `source` into `store`.
    ///
    /// `source` items are fallible so a streaming reader can report problems
    /// per record: `Parse` failures are logged and skipped, any other failure
    /// stops production and becomes the call's error.
    pub async fn load<S>(&self, source: S, store: Arc<dyn VectorStore>) -> Result<LoadSummary>
    where
        S: IntoIterator<Item = Result<WordEmbedding>>,
    {
        let started = Instant::now();
        let (tx, rx) = mpsc::channel::<WordEmbedding>(QUEUE_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            let rx = Arc::clone(&rx);
            let store = Arc::clone(&store);
            workers.spawn(async move {
                let mut inserted = 0usize;
                let mut failed = 0usize;
                loop {
                    let record = rx.lock().await.recv().await;
                    let Some(record) = record else { break };

                    let literal = codec::encode(&record.embedding);
                    match store.insert(&record.word, &literal).await {
                        Ok(()) => inserted += 1,
                        Err(e) => {
                            failed += 1;
                            tracing::warn!(worker = worker_id, error = %e, "insert failed");
                        }
                    }
                }
                (inserted, failed)
            });
        }

        let mut skipped = 0usize;
        let mut source_error: Option<PipelineError> = None;
        for item in source {
            match item {
                Ok(record) => {
                    let stop = tokio::select! {
                        _ = self.cancel.cancelled() => {
                            tracing::info!("load cancelled, draining queued records");
                            true
                        }
                        sent = tx.send(record) => sent.is_err(),
                    };
                    if stop {
                        break;
                    }
                }
                Err(PipelineError::Parse(reason)) => {
                    skipped += 1;
                    tracing::warn!(%reason, "skipping malformed record");
                }
                Err(e) => {
                    source_error = Some(e);
                    break;
                }
            }
        }
        drop(tx);

        let mut inserted = 0usize;
        let mut failed = 0usize;
        while let Some(joined) = workers.join_next().await {
            if let Ok((ok, bad)) = joined {
                inserted += ok;
                failed += bad;
            }
        }

        if let Some(e) = source_error {
            return Err(e);
        }

        let summary = LoadSummary {
            attempted: inserted + failed,
            inserted,
            failed,
            skipped,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            attempted = summary.attempted,
            inserted = summary.inserted,
            failed = summary.failed,
            "bulk load finished"
        );

        Ok(summary)
    }

    /// Load an in-memory record batch.
    pub async fn load_records(
        &self,
        records: Vec<WordEmbedding>,
        store: Arc<dyn VectorStore>,
    ) -> Result<LoadSummary> {
        self.load(records.into_iter().map(Ok), store).await
    }
}
