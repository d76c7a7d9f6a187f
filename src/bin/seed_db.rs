use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use kakeibo::{initialize_db, seed_db};

/// A utility for creating a kakeibo database with the default categories and
/// a few sample transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create the database if needed, then add the default categories and, if the
/// database has no transactions yet, the sample transactions.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'kakeibo.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'kakeibo.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        println!("Seeding existing database at {output_path:#?}");
    } else {
        println!("Creating database at {output_path:#?}");
    }

    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Adding categories and sample transactions...");
    seed_db(&conn)?;

    println!("Success!");

    Ok(())
}
