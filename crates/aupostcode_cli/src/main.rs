//! Offline postcode tooling.
//!
//! # Usage
//!
//! ```bash
//! # Populate the store from a downloaded feed
//! aupostcode import --db postcodes.sqlite3 --json australian_postcodes.json
//!
//! # Run a search exactly as the HTTP route would
//! aupostcode search --db postcodes.sqlite3 spring
//! ```

use aupostcode_core::db::open_db;
use aupostcode_core::{
    core_version, import_feed_file, init_logging, PostcodePool, PostcodeService,
    SqlitePostcodeSource, StatusEnvelope,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aupostcode")]
#[command(about = "Import and query Australian postcodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Absolute directory for rolling log files; logging stays off when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level used with --log-dir
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace stored postcodes with the contents of a JSON feed file
    Import {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        json: PathBuf,
    },
    /// Search localities and print the response envelope as JSON
    Search {
        #[arg(long)]
        db: PathBuf,
        term: String,
    },
    /// Print the core version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Import { db, json } => {
            let mut conn = open_db(&db)?;
            let inserted = import_feed_file(&mut conn, &json)?;
            println!("Total postcodes inserted into database: {inserted}.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { db, term } => {
            let pool = Arc::new(PostcodePool::new(SqlitePostcodeSource::new(db)));
            pool.load(false)?;
            let envelope = PostcodeService::new(pool).search_by_locality(&term);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(exit_code_for(&envelope))
        }
        Commands::Version => {
            println!("aupostcode_core version={}", core_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code_for(envelope: &StatusEnvelope) -> ExitCode {
    if envelope.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
