//! End-to-end walkthrough: one bridge, one store, one mixed batch.
//!
//! Run with `cargo run --example batch_demo`. Set `RUST_LOG=debug` to watch
//! the per-statement dispatch.

use tracing_subscriber::EnvFilter;
use websql_bridge::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let dir = tempfile::tempdir()?;
    let bridge = WebsqlBridge::new(dir.path());

    let request = BatchRequest::new(
        "demo",
        vec![
            QueryAndParams::new_without_params("CREATE TABLE people (name TEXT, age INTEGER)"),
            QueryAndParams::new(
                "INSERT INTO people VALUES (?1, ?2)",
                vec![WireValue::Text("Ada".into()), WireValue::Int(36)],
            ),
            QueryAndParams::new(
                "INSERT INTO people VALUES (?1, ?2)",
                vec![WireValue::Text("Grace".into()), WireValue::Null],
            ),
            QueryAndParams::new_without_params("SELECT name, age FROM people"),
            QueryAndParams::new_without_params("this is not sql"),
        ],
        false,
    );
    let args = serde_json::to_string(&request)?;
    tracing::info!("request: {args}");

    let wire = bridge.handle_call(&args)?;
    println!("{wire}");

    // The same store, now through the read-only gate.
    let wire = bridge.handle_call(
        r#"["demo", [["DELETE FROM people", []], ["SELECT COUNT(*) AS n FROM people", []]], true]"#,
    )?;
    println!("{wire}");
    Ok(())
}
