//! `dirview [ROOT]`: serve ROOT (default: the current directory) with
//! directory listings for folders that have no `index.html`.
//!
//! `RUST_LOG` sets the tracing filter (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dirview::middleware::{DirectoryListing, ListingConfig};
use dirview::{Router, Server, StaticFiles};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command line and environment configuration.
#[derive(Parser, Debug)]
#[command(name = "dirview", version, about = "Development file server with directory listings")]
struct Args {
    /// Directory to serve
    #[arg(default_value = ".")]
    root: PathBuf,
    #[arg(
        long,
        env = "DIRVIEW_ADDR",
        default_value = "127.0.0.1:5173",
        help = "Listen address"
    )]
    addr: String,
    #[arg(
        long,
        env = "DIRVIEW_INDEX",
        default_value = dirview::middleware::DEFAULT_INDEX,
        help = "Index document that hands a directory to the file server"
    )]
    index: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), dirview::Error> {
    let config = ListingConfig::new(&args.root)?.index_file(args.index);
    info!(root = %config.root().display(), index = config.index_name(), "serving");

    let app = Router::new()
        .fallback(StaticFiles::from_config(&config).into_handler())
        .layer(DirectoryListing::new(config));

    Server::bind(args.addr).serve(app).await
}
