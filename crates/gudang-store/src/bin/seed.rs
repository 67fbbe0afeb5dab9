//! # Seed Data Generator
//!
//! Populates a database with the default users and item catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p gudang-store --bin seed
//!
//! # Specify database path
//! cargo run -p gudang-store --bin seed -- --db ./data/gudang.db
//!
//! # Overwrite existing data
//! cargo run -p gudang-store --bin seed -- --force
//! ```
//!
//! ## Seeded Data
//! - Users: `owner/123` (Pak Ketua, owner) and `budi/123` (Budi Santoso,
//!   employee)
//! - Items: the three-coffee starter catalog (KOPI-R-01, KOPI-A-01,
//!   KOPI-L-99)

use std::env;

use gudang_core::{default_items, default_users, total_stock};
use gudang_store::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Library code never installs a subscriber; binaries do
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./gudang_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => {
                force = true;
            }
            "--help" | "-h" => {
                println!("Gudang Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./gudang_dev.db)");
                println!("  -f, --force        Overwrite existing users/items slots");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Gudang Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::open(StoreConfig::new(&db_path)).await?;
    let slots = store.slots();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !force && slots.load_users().await?.is_some() {
        println!();
        println!("⚠ Database already has a users slot");
        println!("  Skipping seed to avoid overwriting data.");
        println!("  Pass --force to seed anyway.");
        return Ok(());
    }

    let users = default_users();
    let items = default_items();

    slots.save_users(&users).await?;
    slots.save_items(&items).await?;

    println!();
    println!("✓ Seeded {} users", users.len());
    for user in &users {
        println!("    {} ({:?})", user.username, user.role);
    }
    println!("✓ Seeded {} items, {} total stock", items.len(), total_stock(&items));
    for item in &items {
        println!("    {} {} - {} {}", item.code, item.name, item.qty, item.unit);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
