//! Print the OpenAPI document as JSON.
//!
//! Writes to stdout, or to `--output <path>` when given.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use utoipa::OpenApi;
use volunteer_backend::ApiDoc;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Export the volunteer backend OpenAPI document")]
struct Args {
    /// Write the document to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    match args.output {
        Some(path) => std::fs::write(path, format!("{json}\n")),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")
        }
    }
}
