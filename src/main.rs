use clap::Parser;
use embedserve::cli::commands::{Cli, Commands};
use embedserve::config::{Config, ENV_LOG};
use embedserve::domain::error::DomainError;
use embedserve::domain::values::metric::Metric;
use embedserve::domain::values::top_k::TopK;
use embedserve::infrastructure::client::remote::RemoteClient;
use embedserve::infrastructure::http::server::{self, QueryDefaults};
use embedserve::EmbedServe;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(config, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(ENV_LOG))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(config: Config, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { corpus, bind } => {
            let corpus = corpus.unwrap_or(config.corpus_dir);
            let bind = bind.unwrap_or(config.bind);
            let es = open(corpus).await?;

            for sample in es.samples(5, 3) {
                info!("File: {} | First 3 values: {:?}", sample.identifier, sample.head);
            }

            let app = es.router(QueryDefaults {
                top_k: config.default_top_k,
                metric: config.default_metric,
            });
            server::serve(app, &bind).await?;
        }
        Commands::Search {
            query_file,
            corpus,
            topk,
            mode,
        } => {
            let embedding = read_query(&query_file)?;
            let es = open(corpus.unwrap_or(config.corpus_dir)).await?;
            let k = match topk {
                Some(k) => TopK::new(k)?,
                None => config.default_top_k,
            };
            let metric = match mode {
                Some(m) => m.parse::<Metric>().map_err(DomainError::InvalidArgument)?,
                None => config.default_metric,
            };
            let result = es.search_with(&embedding, k, metric)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Stats { corpus } => {
            let es = open(corpus.unwrap_or(config.corpus_dir)).await?;
            println!("{}", serde_json::to_string_pretty(&es.stats())?);
        }
        Commands::Remote {
            query_file,
            url,
            topk,
            mode,
        } => {
            let embedding = read_query(&query_file)?;
            let client = RemoteClient::new(url);
            if !client.health().await? {
                return Err("Server did not report healthy".into());
            }
            let result = client.query(embedding, topk, mode).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

/// Corpus loading walks the filesystem; run it off the async workers.
async fn open(corpus: PathBuf) -> Result<EmbedServe, Box<dyn std::error::Error>> {
    let es = tokio::task::spawn_blocking(move || EmbedServe::open(corpus)).await??;
    Ok(es)
}

fn read_query(path: &Path) -> Result<Vec<f32>, DomainError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(format!("Could not open file {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| DomainError::Parse(format!("Error parsing file {}: {e}", path.display())))
}
