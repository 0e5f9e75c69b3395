//! pagecrypt CLI
//!
//! Command-line tools for encrypted page files.
//!
//! # Commands
//!
//! - `inspect` - Display header metadata without a key
//! - `rekey` - Re-encrypt a file under a new key
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pagecrypt command-line tools.
#[derive(Parser)]
#[command(name = "pagecrypt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the encrypted page file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Page size of the file in bytes
    #[arg(global = true, long, default_value = "4096")]
    page_size: usize,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header metadata without a key
    Inspect,

    /// Re-encrypt the file under a new key
    Rekey {
        /// Current key (passphrase or x'..' hex literal)
        #[arg(long)]
        key: String,

        /// New key (passphrase or x'..' hex literal)
        #[arg(long)]
        new_key: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect => {
            let path = cli.path.ok_or("File path required for inspect")?;
            commands::inspect::run(&path, cli.page_size)?;
        }
        Commands::Rekey { key, new_key } => {
            let path = cli.path.ok_or("File path required for rekey")?;
            commands::rekey::run(&path, cli.page_size, &key, &new_key)?;
        }
        Commands::Version => {
            println!("pagecrypt CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("pagecrypt codec v{}", pagecrypt_codec::VERSION);
            println!("pagecrypt pager v{}", pagecrypt_pager::VERSION);
        }
    }

    Ok(())
}
