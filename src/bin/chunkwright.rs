//! chunkwright CLI binary.
//!
//! Command-line interface for document chunking and contextual enrichment.

use chunkwright::cli::{CliArgs, Runner};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp || e.kind() == clap::error::ErrorKind::DisplayVersion {
                print!("{e}");
                process::exit(0);
            }
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let runner = Runner::new(args);

    match runner.run().await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
