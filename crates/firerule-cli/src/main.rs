//! Firerule CLI - Extract fire-protection rules from regulation text.

use clap::Parser;
use firerule_cli::Cli;

fn main() {
    // A missing .env is fine; the key may come from the real environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    firerule_cli::init_logging(cli.verbose);

    if let Err(e) = firerule_cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
