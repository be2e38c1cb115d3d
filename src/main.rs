use anyhow::Result;
use rusqlite::Connection;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

use listing_desk::{
    export_csv, get_all_listings, save_portfolio, setup_database, verify_count, ConsoleSession,
    Portfolio,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("browse") => run_browse_mode()?,
        Some("export") => {
            let csv_path = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
                PathBuf::from("listings_export.csv")
            });
            run_export(&csv_path)?;
        }
        _ => run_console_session()?,
    }

    Ok(())
}

/// Database location: LISTING_DESK_DB env var, or listings.db in the
/// working directory.
fn db_path() -> PathBuf {
    env::var("LISTING_DESK_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("listings.db"))
}

fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    setup_database(&conn)?;
    Ok(conn)
}

fn run_console_session() -> Result<()> {
    println!("🏠 Listing Desk - property listings from the console");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path = db_path();
    let conn = open_database(&db_path)?;

    let saved = get_all_listings(&conn)?;
    if saved.is_empty() {
        println!("Starting with an empty portfolio.\n");
    } else {
        println!("Loaded {} saved listings from {}.\n", saved.len(), db_path.display());
    }

    let stdin = io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), io::stdout(), Portfolio::from_listings(saved));
    session.run()?;

    // Persist whatever the session left in the portfolio.
    let portfolio = session.into_portfolio();
    let summary = save_portfolio(&conn, &portfolio, "console")?;

    println!();
    println!("✓ Saved portfolio to {}", db_path.display());
    println!(
        "✓ {} added, {} removed, {} unchanged ({} total)",
        summary.added,
        summary.removed,
        summary.kept,
        verify_count(&conn)?
    );

    Ok(())
}

fn run_export(csv_path: &Path) -> Result<()> {
    let db_path = db_path();

    if !db_path.exists() {
        eprintln!("❌ Database not found: {}", db_path.display());
        eprintln!("   Record some listings first by running without arguments.");
        std::process::exit(1);
    }

    let conn = open_database(&db_path)?;
    let listings = get_all_listings(&conn)?;

    let written = export_csv(&listings, csv_path)?;
    println!("✓ Exported {} listings to {}", written, csv_path.display());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse_mode() -> Result<()> {
    use listing_desk::ui;

    let db_path = db_path();

    if !db_path.exists() {
        eprintln!("❌ Database not found: {}", db_path.display());
        eprintln!("   Record some listings first by running without arguments.");
        std::process::exit(1);
    }

    let conn = open_database(&db_path)?;

    println!("📋 Loading listings...");
    let listings = get_all_listings(&conn)?;
    let total_count = verify_count(&conn)?;

    println!("✓ Loaded {} listings\n", listings.len());
    println!("Starting browse mode... (Press 'q' to quit)\n");

    let mut app = ui::App::new(listings, total_count);
    ui::run_ui(&mut app)?;

    println!("\n✅ Browse mode closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse_mode() -> Result<()> {
    eprintln!("❌ Browse mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
