//! Checks a mix of dependency queries concurrently against the public Patton server.
//!
//! Run with `cargo run --example check_dependencies`.

use anyhow::Result;
use patton_client::report::render_dependencies;
use patton_client::{PattonClient, PattonConfig, QueryInput};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let queries: Vec<QueryInput> = vec![
        "django:2.0.1".into(),
        "django:1.9 python:3.4 openssh:7.3.".into(),
        vec!["celery:1.0", "python:3.6"].into(),
        "python:2.7".into(),
    ];

    let env_vars = std::env::vars().collect();
    let config = PattonConfig::load_with_precedence(&env_vars)?;

    let mut client = PattonClient::new(config)?;
    let display_format = client.get_config(None, None).display_format;
    let results = client.check_dependencies_batch(queries).await;
    client.close_session();

    for (i, result) in results?.iter().enumerate() {
        println!("QUERY {}", i);
        println!("{}", render_dependencies(result, display_format));
    }

    Ok(())
}
