//! Interactive document chat
//!
//! Run with: cargo run --features cli --bin doc-rag-chat -- <file>

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doc_rag::config::PipelineConfig;
use doc_rag::embedding::OllamaEmbedder;
use doc_rag::generation::OllamaGenerator;
use doc_rag::ollama::OllamaClient;
use doc_rag::session::{DocumentSession, UploadOutcome};

#[derive(Parser)]
#[command(name = "doc-rag-chat", about = "Chat with a single document")]
struct Args {
    /// Document to ingest (pdf, docx, txt, html, csv, xlsx)
    file: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };

    tracing::info!("Embedding model: {}", config.embedding.model);
    tracing::info!("Generation model: {}", config.llm.generate_model);
    tracing::info!("Chunk size: {} (overlap {})", config.chunking.chunk_size, config.chunking.chunk_overlap);

    let client = Arc::new(OllamaClient::new(&config.llm)?);
    if !client.health_check().await {
        tracing::warn!("Ollama not reachable at {}", config.llm.base_url);
        tracing::warn!("Start it with: ollama serve");
        tracing::warn!(
            "Pull models with: ollama pull {} && ollama pull {}",
            config.embedding.model,
            config.llm.generate_model
        );
        anyhow::bail!("Ollama is not running");
    }

    let embedder = Arc::new(OllamaEmbedder::new(Arc::clone(&client), &config.embedding));
    let generator = Arc::new(OllamaGenerator::new(Arc::clone(&client), &config.llm));

    let mut session = DocumentSession::new(config, embedder, generator)?;

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    let data = std::fs::read(&args.file)?;

    println!("Indexing {}...", filename);
    match session.upload(&filename, &data).await? {
        UploadOutcome::Ingested(doc) => {
            println!("Ready: {} chunks indexed.", doc.total_chunks)
        }
        UploadOutcome::Unchanged => println!("Document already indexed."),
    }

    println!("Ask questions about the document (empty line to quit).\n");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            break;
        }

        match session.ask(question).await {
            Ok(response) => {
                println!("\n{}\n", response.answer);
                for chunk in &response.context {
                    println!(
                        "  [chunk {} @ {} ({} chars), similarity {:.3}]",
                        chunk.index, chunk.char_start, chunk.length, chunk.similarity
                    );
                }
                println!();
            }
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}
