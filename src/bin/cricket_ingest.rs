use std::path::PathBuf;

use anyhow::{Context, Result};

use cricket_terminal::cli::arg_value;
use cricket_terminal::config::AppConfig;
use cricket_terminal::db::Database;
use cricket_terminal::ingest::{self, IngestOutcome};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let db_path = arg_value(&args, "--db")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.db_path.clone());
    let csv_path = arg_value(&args, "--csv")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.sample_csv.clone());

    let db = Database::open(&db_path).context("unable to open database")?;
    let outcome = ingest::load_sample_players(&db, &csv_path);
    outcome.log();

    println!("Players ingest finished");
    println!("DB: {}", db.path().display());
    println!("CSV: {}", csv_path.display());
    match &outcome {
        IngestOutcome::Loaded(report) => {
            println!("Columns: {}", report.columns.join(", "));
            println!("Rows read: {}", report.rows_read);
            println!("Rows inserted: {}", report.rows_inserted);
            println!("Duplicates dropped: {}", report.duplicates_dropped);
        }
        other => println!("{other}"),
    }

    Ok(())
}
