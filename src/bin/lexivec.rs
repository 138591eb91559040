//! Lexivec CLI: generate embeddings, bulk load them, query nearest words.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lexivec::{
    codec, source, BulkLoader, Config, Embedder, EmbeddingGenerator, OllamaClient, PgVectorStore,
    SimilarityQuery,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "lexivec")]
#[command(about = "Word embedding pipeline with pgvector similarity search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate embeddings for a word list and write them as JSONL
    Generate {
        /// Word list file, one word per line
        words: PathBuf,

        /// Output JSONL file
        #[arg(long, default_value = "embeddings.jsonl")]
        output: PathBuf,

        /// Maximum in-flight embedding requests
        #[arg(long, env = "LEXIVEC_CONCURRENCY")]
        concurrency: Option<usize>,

        /// Embedding model identifier
        #[arg(long, env = "LEXIVEC_MODEL")]
        model: Option<String>,
    },

    /// Bulk load a JSONL embeddings file into the vector store
    Load {
        /// Input JSONL file
        input: PathBuf,

        /// Insert worker count
        #[arg(long, env = "LEXIVEC_WORKERS")]
        workers: Option<usize>,
    },

    /// Find the stored words nearest to a query vector
    Query {
        /// Query word, embedded via the model endpoint
        #[arg(long, conflicts_with = "vector")]
        word: Option<String>,

        /// Query vector literal, e.g. "[0.1,0.2,0.3]"
        #[arg(long)]
        vector: Option<String>,

        /// Number of matches to return
        #[arg(long, default_value = "5")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, shutting down cleanly");
            interrupt.cancel();
        }
    });

    match cli.command {
        Commands::Generate {
            words,
            output,
            concurrency,
            model,
        } => generate(&config, words, output, concurrency, model, cancel).await,
        Commands::Load { input, workers } => load(&config, input, workers, cancel).await,
        Commands::Query {
            word,
            vector,
            limit,
        } => query(&config, word, vector, limit).await,
    }
}

async fn generate(
    config: &Config,
    words_path: PathBuf,
    output: PathBuf,
    concurrency: Option<usize>,
    model: Option<String>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let words = source::read_words(&words_path)
        .with_context(|| format!("reading word list {}", words_path.display()))?;

    let client = Arc::new(OllamaClient::new(
        config.endpoint.clone(),
        model.unwrap_or_else(|| config.model.clone()),
    ));

    eprintln!("Generating embeddings for {} words...", words.len());
    let generator = EmbeddingGenerator::new(client, concurrency.unwrap_or(config.concurrency))
        .with_progress(|done, total| {
            eprint!("\rProgress: {}/{}", done, total);
            let _ = std::io::stderr().flush();
        })
        .with_cancellation(cancel);

    let (records, summary) = generator.generate(words).await;
    eprintln!();

    let written = source::write_records(&output, &records)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} embeddings written to {} in {:.2?} ({} failed)",
        written,
        output.display(),
        summary.elapsed,
        summary.failed
    );
    Ok(())
}

async fn load(
    config: &Config,
    input: PathBuf,
    workers: Option<usize>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let workers = workers.unwrap_or(config.workers);
    let store = Arc::new(PgVectorStore::connect(&config.database_url, workers)?);
    store.ensure_schema().await?;

    let records =
        source::record_stream(&input).with_context(|| format!("opening {}", input.display()))?;

    let loader = BulkLoader::new(workers).with_cancellation(cancel);
    let summary = loader.load(records, store).await?;

    println!(
        "{}/{} records inserted in {:.2?} ({} failed, {} skipped)",
        summary.inserted, summary.attempted, summary.elapsed, summary.failed, summary.skipped
    );
    Ok(())
}

async fn query(
    config: &Config,
    word: Option<String>,
    vector: Option<String>,
    limit: i64,
) -> anyhow::Result<()> {
    let query_vector = match (word, vector) {
        (Some(word), _) => {
            let client = OllamaClient::new(config.endpoint.clone(), config.model.clone());
            client
                .fetch(&word)
                .await
                .with_context(|| format!("embedding query word '{}'", word))?
        }
        (None, Some(literal)) => codec::decode(&literal)?,
        (None, None) => anyhow::bail!("provide --word or --vector"),
    };

    let store = Arc::new(PgVectorStore::connect(&config.database_url, 1)?);
    let matches = SimilarityQuery::new(store)
        .nearest(&query_vector, limit)
        .await?;

    if matches.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for m in &matches {
        println!("{:>6}  {:<24} {:.4}", m.id, m.word, m.distance);
    }
    Ok(())
}
