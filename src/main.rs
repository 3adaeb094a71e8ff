//! Sparse Order - Binary Entry Point
//!
//! Runs a short scripted session against the ordering engine and prints the
//! resulting pages and state digest. Set `RUST_LOG=sparse_order=debug` to see
//! every reorder and renormalization.

use std::error::Error;

use sparse_order::{OrderingEngine, PageItem, Position};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CLIENT: &str = "demo";

fn init_tracing() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}

fn print_page(title: &str, page: &[PageItem]) {
    println!("{}:", title);
    for item in page {
        let mark = if item.selected { "[x]" } else { "[ ]" };
        println!("  {} {}", mark, item.label);
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing()?;

    println!("===========================================");
    println!("  Sparse Order - ordering engine demo");
    println!("===========================================");
    println!();

    let engine = OrderingEngine::new();

    let outcome = engine.reorder_insert(CLIENT, 130, 30, Position::Before)?;
    println!("Moved #130 before #30: rank {}", outcome.rank);
    engine.reorder_insert(CLIENT, 230, 130, Position::Before)?;
    print_page("Around #30", &engine.list_page(CLIENT, None, 26, 6)?);

    engine.reorder_insert(CLIENT, 2, 1, Position::Before)?;
    engine.toggle_selection(CLIENT, &[2, 4], true)?;
    print_page("First page", &engine.list_page(CLIENT, None, 0, 5)?);

    print_page("Matching \"12\"", &engine.list_page(CLIENT, Some("12"), 0, 5)?);

    let digest = engine.state_digest(CLIENT)?;
    println!("Overrides: {}", digest.override_count);
    println!("Selected:  {}", digest.selected_count);
    println!("State root: {}", digest.state_root_hex());

    Ok(())
}
