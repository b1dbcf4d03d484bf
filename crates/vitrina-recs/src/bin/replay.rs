//! # Purchase Log Replay
//!
//! Feeds a catalog and a purchase log into a fresh engine and prints the
//! suggestions for a cart. Handy for tuning weights against real sales.
//!
//! ## Usage
//! ```bash
//! # Suggestions for a cart
//! cargo run -p vitrina-recs --bin replay -- sales.json --cart p1,p4
//!
//! # Returning customer, custom weights
//! cargo run -p vitrina-recs --bin replay -- sales.json --cart p1 --customer c1 \
//!     --config ./recommendations.toml
//!
//! # Stats and a full snapshot instead of suggestions
//! cargo run -p vitrina-recs --bin replay -- sales.json --stats --export
//! ```
//!
//! ## Input File
//! ```json
//! {
//!   "catalog": [
//!     { "id": "p1", "name": "Laptop", "category": "Electronics", "price": 100000 }
//!   ],
//!   "purchases": [
//!     { "product_ids": ["p1", "p4"], "customer_id": "c1", "total": 102000 }
//!   ]
//! }
//! ```
//! A file written by `--export` (an `EngineSnapshot`) is accepted too.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vitrina_core::validation::validate_catalog;
use vitrina_core::{CatalogProduct, Money};
use vitrina_recs::{EngineSnapshot, RecommendationEngine, RecsConfig, RecsError, RecsResult};

/// One sale in the input file.
#[derive(Debug, Deserialize)]
struct ReplayPurchase {
    product_ids: Vec<String>,
    #[serde(default)]
    customer_id: Option<String>,
    #[serde(default)]
    total: Option<Money>,
}

/// Hand-written input: catalog plus simple purchase rows.
#[derive(Debug, Deserialize)]
struct ReplayInput {
    #[serde(default)]
    catalog: Vec<CatalogProduct>,
    #[serde(default)]
    purchases: Vec<ReplayPurchase>,
}

/// Either input shape; snapshots carry full `PurchaseEvent`s.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputFile {
    Snapshot(EngineSnapshot),
    Replay(ReplayInput),
}

#[derive(Debug, Default)]
struct Options {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    cart: Vec<String>,
    customer: Option<String>,
    min_confidence: Option<f64>,
    max_results: Option<usize>,
    stats: bool,
    export: bool,
    help: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let options = parse_args(env::args().skip(1));
    if options.help || options.input.is_none() {
        print_help();
        return if options.help {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_user_error() {
                eprintln!("Check the input file and config values.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> RecsResult<()> {
    let config = match &options.config {
        Some(path) => RecsConfig::load(Some(path.clone()))?,
        None => RecsConfig::load_or_default(None),
    };

    let path = options
        .input
        .as_ref()
        .ok_or_else(|| RecsError::Io(std::io::Error::other("no input file")))?;
    let contents = std::fs::read_to_string(path)?;
    let engine = build_engine(config, serde_json::from_str(&contents)?)?;

    let stats = engine.get_stats();
    info!(
        purchases = stats.total_purchases,
        associations = stats.total_associations,
        catalog = stats.catalog_size,
        "Replay loaded"
    );

    if options.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    if options.export {
        println!("{}", serde_json::to_string_pretty(&engine.export_data())?);
    }
    if !options.cart.is_empty() {
        let recs = engine.get_recommendations(
            &options.cart,
            options.customer.as_deref(),
            options.min_confidence,
            options.max_results,
        );
        println!("{}", serde_json::to_string_pretty(&recs)?);
    }

    Ok(())
}

fn build_engine(config: RecsConfig, input: InputFile) -> RecsResult<RecommendationEngine> {
    let mut engine = RecommendationEngine::with_config(config);

    match input {
        InputFile::Snapshot(snapshot) => engine.restore(snapshot),
        InputFile::Replay(replay) => {
            validate_catalog(&replay.catalog).map_err(RecsError::InvalidInput)?;
            engine.set_products(replay.catalog);
            for purchase in replay.purchases {
                engine.record_purchase(
                    purchase.product_ids,
                    purchase.customer_id.as_deref(),
                    purchase.total,
                );
            }
        }
    }

    Ok(engine)
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Options {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cart" => {
                if let Some(value) = args.next() {
                    options.cart = value.split(',').map(str::to_string).collect();
                }
            }
            "--customer" => options.customer = args.next(),
            "--config" => options.config = args.next().map(PathBuf::from),
            "--min-confidence" => {
                options.min_confidence = args.next().and_then(|v| v.parse().ok());
            }
            "--max" => options.max_results = args.next().and_then(|v| v.parse().ok()),
            "--stats" => options.stats = true,
            "--export" => options.export = true,
            "--help" | "-h" => options.help = true,
            other if !other.starts_with("--") && options.input.is_none() => {
                options.input = Some(PathBuf::from(other));
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
    }

    options
}

fn print_help() {
    println!("Vitrina POS Purchase Log Replay");
    println!();
    println!("Usage: replay <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --cart <IDS>            Comma-separated cart product ids");
    println!("  --customer <ID>         Customer id for history-based suggestions");
    println!("  --config <PATH>         recommendations.toml to use");
    println!("  --min-confidence <X>    Override the confidence threshold");
    println!("  --max <N>               Override the result limit");
    println!("  --stats                 Print engine stats");
    println!("  --export                Print a JSON snapshot of the history");
    println!("  -h, --help              Show this help message");
}

/// Log levels via `RUST_LOG`; default `info,vitrina=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitrina=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&[
            "sales.json",
            "--cart",
            "p1,p4",
            "--customer",
            "c1",
            "--max",
            "3",
            "--stats",
        ]));
        assert_eq!(options.input, Some(PathBuf::from("sales.json")));
        assert_eq!(options.cart, vec!["p1", "p4"]);
        assert_eq!(options.customer.as_deref(), Some("c1"));
        assert_eq!(options.max_results, Some(3));
        assert!(options.stats);
        assert!(!options.export);
    }

    #[test]
    fn test_build_engine_from_replay_input() {
        let input: InputFile = serde_json::from_str(
            r#"{
                "catalog": [
                    {"id": "p1", "name": "Laptop", "category": "Electronics", "price": 500},
                    {"id": "p2", "name": "Laptop Pro", "category": "Electronics", "price": 1500}
                ],
                "purchases": [
                    {"product_ids": ["p1"], "total": 500},
                    {"product_ids": ["p1", "p2"], "customer_id": "c1"}
                ]
            }"#,
        )
        .unwrap();

        let engine = build_engine(RecsConfig::default(), input).unwrap();
        assert_eq!(engine.get_stats().total_purchases, 2);
        assert_eq!(engine.get_stats().recorded_revenue, Money::from_cents(500));

        let recs = engine.recommend(&["p1"], None);
        assert_eq!(recs[0].product_id, "p2");
        assert_eq!(recs[0].price, Some(Money::from_cents(1500)));
    }

    #[test]
    fn test_build_engine_from_snapshot() {
        let mut source = RecommendationEngine::new();
        source.record_purchase(["a", "b"], Some("c1"), None);
        let json = serde_json::to_string(&source.export_data()).unwrap();

        let input: InputFile = serde_json::from_str(&json).unwrap();
        assert!(matches!(input, InputFile::Snapshot(_)));
        let engine = build_engine(RecsConfig::default(), input).unwrap();
        assert_eq!(engine.get_stats().total_associations, 1);
    }

    #[test]
    fn test_bad_catalog_is_rejected() {
        let input: InputFile = serde_json::from_str(
            r#"{"catalog": [
                {"id": "p1", "name": "A", "category": "X", "price": 1},
                {"id": "p1", "name": "B", "category": "X", "price": 2}
            ]}"#,
        )
        .unwrap();
        let err = build_engine(RecsConfig::default(), input).unwrap_err();
        assert!(matches!(err, RecsError::InvalidInput(_)));
    }
}
