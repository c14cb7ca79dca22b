//! Basic codeerr example
//!
//! Registers a few codes, builds a chain through a failing "repository"
//! call, and prints the plain text, the detailed form, and the parsed code.
//!
//! # Environment Variables
//!
//! - `CODEERR_APP_CODE=3` - Application code applied to the global center
//! - `CODEERR_STACK_DEPTH=8` - Frames kept per captured stack
//! - `RUST_LOG=debug` - Log filter for the registry events

use codeerr::codes::{ERR_DB, ERR_PARAM};
use codeerr::{Config, ResultExt};
use tracing_subscriber::EnvFilter;

// RUST_LOG=debug CODEERR_APP_CODE=3 cargo run -p codeerr-basic
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== codeerr Basic Example ===\n");

    let config = Config::from_env();
    config.apply(codeerr::global());
    tracing::info!(
        app_code = config.app_code,
        stack_depth = config.stack_depth,
        service_code = codeerr::global().service_code(),
        "configured"
    );

    codeerr::new_internal_error(ERR_DB, "database unavailable");
    codeerr::new_bad_request(ERR_PARAM, "invalid parameter");
    // Ignored: first registration wins.
    codeerr::new_not_found(ERR_PARAM, "not found");

    let err = match load_user(0) {
        Ok(name) => {
            println!("loaded {}", name);
            return;
        }
        Err(err) => err,
    };
    println!("plain:    {}", err);
    println!("quoted:   {:?}", err);
    println!("detailed:\n{:#}\n", err);

    let err = match find_user(7) {
        Ok(name) => {
            println!("found {}", name);
            return;
        }
        Err(err) => codeerr::wrap!(err.clone(), "finding user {}", 7).unwrap_or(err),
    };
    let code = codeerr::parse_code(&err);
    match serde_json::to_string_pretty(&code) {
        Ok(json) => println!("parsed code:\n{}", json),
        Err(e) => eprintln!("serialize failed: {}", e),
    }
    println!("is ERR_DB: {}", codeerr::is_code(&err, ERR_DB));
    println!("root cause: {:?}", codeerr::unwrap_cause(&err));

    println!("\n=== Example Complete ===");
}

fn load_user(id: u64) -> codeerr::Result<String> {
    codeerr::ensure!(id > 0, "user id must be positive, got {}", id);
    Ok(format!("user-{}", id))
}

fn query(id: u64) -> std::io::Result<String> {
    Err(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!("connection refused while reading row {}", id),
    ))
}

fn find_user(id: u64) -> codeerr::Result<String> {
    let row = query(id).with_code(ERR_DB)?;
    Ok(row)
}
