//! Checks two banner queries concurrently against the public Patton server.
//!
//! Run with `cargo run --example check_banners`. Set `PATTON_SERVER_HOST`
//! to point at another server.

use anyhow::Result;
use patton_client::report::render_banners;
use patton_client::{PattonClient, PattonConfig};
use tracing_subscriber::EnvFilter;

const QUERIES: [&[&str]; 2] = [
    &["Apache httpd extrainfo: SSL-only mode"],
    &["SSH-2.0-OpenSSH_7.4p1 Debian-10+deb9u3"],
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let env_vars = std::env::vars().collect();
    let config = PattonConfig::load_with_precedence(&env_vars)?;

    let mut client = PattonClient::new(config)?;
    let display_format = client.get_config(None, None).display_format;
    let results = client.check_banners_batch(QUERIES).await;
    client.close_session();

    for (i, result) in results?.iter().enumerate() {
        println!("QUERY {}", i);
        println!("{}", render_banners(result, display_format));
    }

    Ok(())
}
