use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use hybrag::config::AppConfig;
use hybrag::rag::KnowledgeRouter;
use hybrag::Result;

#[derive(Parser)]
#[command(name = "hybrag")]
#[command(about = "Hybrid graph/vector/web question-answering service")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the configuration file (defaults to config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Answer a single question and exit
    Ask {
        /// The question to answer
        question: String,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        hybrag::logging::init_logging_with_level("debug")?;
    } else {
        hybrag::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Serve { host, port, cors } => {
            hybrag::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Ask { question } => {
            let router = KnowledgeRouter::from_config(&config).await?;
            let result = router.answer(&question).await?;
            println!("{}", result.format());
        }
        Commands::Config => {
            print_config(&config);
        }
    }

    Ok(())
}

/// Print the resolved configuration with secrets redacted
fn print_config(config: &AppConfig) {
    let mut redacted = config.clone();
    redacted.llm.llm_key = redact(&redacted.llm.llm_key);
    redacted.graph.password = redact(&redacted.graph.password);
    redacted.web_search.api_key = redact(&redacted.web_search.api_key);
    if let Some(key) = redacted.embeddings.api_key.as_mut() {
        *key = redact(key);
    }

    match toml::to_string_pretty(&redacted) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("Failed to render config: {e}"),
    }
}

fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}
