//! CLI entry point. All logic lives in [`schema_gzip_ingest::cli`].

use schema_gzip_ingest::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
