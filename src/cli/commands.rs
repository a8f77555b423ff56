use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "embedserve", about = "In-memory nearest-neighbor search over embedding files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a corpus and serve /health, /query and /stats over HTTP
    Serve {
        /// Directory scanned recursively for *.json embeddings
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Listen address (default 0.0.0.0:1234)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one query locally against a corpus
    Search {
        /// File holding the query embedding as a JSON array
        query_file: PathBuf,
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Number of matches to return
        #[arg(long)]
        topk: Option<i64>,
        /// Ranking mode (cosine, euclidean)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Show corpus size, dimension and load counters
    Stats {
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Send a query file to a running server
    Remote {
        /// File holding the query embedding as a JSON array
        query_file: PathBuf,
        /// Server base URL
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        topk: Option<i64>,
        #[arg(long)]
        mode: Option<String>,
    },
}
