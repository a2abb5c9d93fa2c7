//! Tidemark CLI - lay out interaction diagrams as JSON drawing primitives

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();
    let mut app = cli::TidemarkApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
