//! docqa CLI
//!
//! Main entry point for the docqa command-line tool: ask natural-language
//! questions about text, document, image and audio/video files, answered by
//! a local LLM grounded in retrieved chunks.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ChatCommand, ExtractCommand, QueryCommand};
use docqa_core::{config::AppConfig, logging, AppResult};

/// docqa - document question answering with local-first RAG
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about documents, images and recordings", long_about = None)]
#[command(version)]
struct Cli {
    /// Ollama endpoint for embeddings and generation
    #[arg(long, global = true, env = "DOCQA_ENDPOINT")]
    endpoint: Option<String>,

    /// Embedding model identifier
    #[arg(long, global = true, env = "DOCQA_EMBED_MODEL")]
    embed_model: Option<String>,

    /// Generation model identifier
    #[arg(long, global = true, env = "DOCQA_GEN_MODEL")]
    gen_model: Option<String>,

    /// Chunk size in characters
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Overlap between consecutive chunks, in characters
    #[arg(long, global = true)]
    overlap: Option<usize>,

    /// Number of chunks to retrieve per query
    #[arg(short = 'k', long, global = true)]
    top_k: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index files and answer a single question
    Query(QueryCommand),

    /// Index files, then answer questions interactively from stdin
    Chat(ChatCommand),

    /// Extract and print the text of a file (inspection)
    Extract(ExtractCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.endpoint,
        cli.embed_model,
        cli.gen_model,
        cli.chunk_size,
        cli.overlap,
        cli.top_k,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("docqa starting");
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!(
        "Embedding: {}/{}, generation: {}/{}",
        config.embed_provider,
        config.embed_model,
        config.gen_provider,
        config.gen_model
    );

    let command_name = match &cli.command {
        Commands::Query(_) => "query",
        Commands::Chat(_) => "chat",
        Commands::Extract(_) => "extract",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Query(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Extract(cmd) => cmd.execute().await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
