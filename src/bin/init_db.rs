use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::initialize_db;

/// Create the expense tracker's database tables if they do not exist.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "EXPENSES_DB_PATH")]
    db_path: String,
}

fn main() {
    let args = Args::parse();

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            eprintln!("Could not open database at {:#?}: {error}", args.db_path);
            exit(1);
        }
    };

    if let Err(error) = initialize_db(&connection) {
        eprintln!("Could not create database tables: {error}");
        exit(1);
    }

    println!("Database tables created successfully!");
}
