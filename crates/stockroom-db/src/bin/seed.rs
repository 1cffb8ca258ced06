//! # Seed Data Generator
//!
//! Populates the store with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default) at the platform data path
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Generated Products
//! - Tiles (floor, wall, vitrified) in several sizes
//! - Sanitaryware (closets, basins, faucets)
//! - Other goods (adhesive, grout, spacers)
//!
//! Each product has:
//! - Unique serial: `{CODE}-{INDEX}`
//! - Brand and name from the tables below
//! - Price per box: ₹250 - ₹12,249
//! - Stock: 0 - 60 boxes, so some rows start out low

use std::env;
use std::sync::Arc;

use stockroom_core::{Money, Product};
use stockroom_db::{default_database_path, Database, DbConfig, Ledger, LedgerConfig};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 60;

/// (serial code, type label, brands, names)
const CATEGORIES: &[(&str, &str, &[&str], &[&str])] = &[
    (
        "TL",
        "Tile",
        &["Kajaria", "Somany", "Johnson", "Nitco", "Orient Bell"],
        &[
            "Marble Beige",
            "Statuario White",
            "Rustic Wood",
            "Slate Grey",
            "Glossy Ivory",
            "Terracotta Matt",
            "Onyx Black",
            "Travertine Cream",
        ],
    ),
    (
        "SN",
        "Sanitary",
        &["Hindware", "Cera", "Jaquar", "Parryware"],
        &[
            "Wall Hung WC",
            "One Piece Closet",
            "Table Top Basin",
            "Pedestal Basin",
            "Pillar Cock",
            "Health Faucet",
            "Overhead Shower",
        ],
    ),
    (
        "OT",
        "Adhesive",
        &["Roff", "MYK Laticrete", "Fevicol"],
        &["Tile Fix 20kg", "Epoxy Grout 1kg", "Spacers 3mm", "Stone Sealer"],
    ),
];

/// Tile sizes; boxes of larger tiles hold fewer pieces.
const SIZES: &[(&str, i64)] = &[
    ("300x300", 11),
    ("300x600", 8),
    ("600x600", 4),
    ("600x1200", 2),
    ("800x1600", 2),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $STOCKROOM_DB_PATH or app data dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let db_path = match db_path {
        Some(path) => path.into(),
        None => default_database_path()?,
    };

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path.display());
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let mut ledger = Ledger::initialize(Arc::new(db.store()), LedgerConfig::from_env()).await?;

    let existing = ledger.summary().product_count;
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid overwriting stock.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let products = generate_catalog(count);
    let report = ledger.import_products(products).await?;
    let elapsed = start.elapsed();

    println!();
    println!("✓ Imported {} products in {:?}", report.inserted, elapsed);

    let summary = ledger.summary();
    println!("  Stock on hand: {} boxes", summary.total_stock_units);
    println!("  Low stock:     {} products", summary.low_stock_products.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Cycles through every category so a small count still covers all three.
fn generate_catalog(count: usize) -> Vec<Product> {
    (0..count)
        .map(|seed| {
            let (code, kind, brands, names) = CATEGORIES[seed % CATEGORIES.len()];
            let round = seed / CATEGORIES.len();
            generate_product(code, kind, brands, names, round, seed)
        })
        .collect()
}

/// Generates a single product with plausible data.
fn generate_product(
    code: &str,
    kind: &str,
    brands: &[&str],
    names: &[&str],
    round: usize,
    seed: usize,
) -> Product {
    let serial = format!("{}-{:04}", code, seed + 1);
    let brand = brands[round % brands.len()];
    let name = names[round % names.len()];

    let rupees = 250 + ((seed * 137) % 12_000) as i64;
    let stock = ((seed * 31) % 61) as i64;

    let product = Product::new(serial, kind, brand, name)
        .with_price_per_box(Money::from_rupees(rupees))
        .with_stock(stock);

    if kind == "Tile" {
        let (size, pieces) = SIZES[round % SIZES.len()];
        product
            .with_size(format!("{size} mm"))
            .with_boxes(stock)
            .with_pieces(stock * pieces)
    } else {
        product
    }
}
