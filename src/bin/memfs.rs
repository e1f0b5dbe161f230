//! Memfs Shell Binary
//!
//! Interactive shell over an in-memory hierarchical namespace.

use clap::Parser;
use memfs::tooling::cli::{run, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
