use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use cricket_terminal::cli::{arg_value, has_flag};
use cricket_terminal::config::AppConfig;
use cricket_terminal::db::Database;
use cricket_terminal::export;
use cricket_terminal::queries::{self, CANNED_QUERIES, QueryOutcome};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if has_flag(&args, "--list") {
        for query in CANNED_QUERIES {
            println!("Query {}: {}", query.id, query.title);
            println!("{}", query.sql.trim());
            println!();
        }
        return Ok(());
    }

    let query_id = arg_value(&args, "--id")
        .map(|raw| raw.parse::<u32>().context("--id must be a number"))
        .transpose()?
        .unwrap_or(1);
    let query = queries::canned_query(query_id)
        .ok_or_else(|| anyhow!("no canned query with id {query_id} (see --list)"))?;
    let xlsx = has_flag(&args, "--xlsx");
    let extension = if xlsx { "xlsx" } else { "csv" };

    let db_path = arg_value(&args, "--db")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.db_path.clone());
    let out = arg_value(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| export::query_export_path(&config.export_dir, query.id, extension));

    let db = Database::open(&db_path).context("unable to open database")?;
    let table = match queries::run_query(&db, query.sql) {
        QueryOutcome::Rows(table) => table,
        QueryOutcome::Failed { message } => {
            return Err(anyhow!("query {} failed: {message}", query.id));
        }
    };

    if xlsx {
        export::export_xlsx(&table, &format!("query_{}", query.id), &out)?;
    } else {
        export::export_csv(&table, &out)?;
    }

    println!("Query {}: {}", query.id, query.title);
    println!("Rows: {}", table.rows.len());
    println!("Written: {}", out.display());
    Ok(())
}
