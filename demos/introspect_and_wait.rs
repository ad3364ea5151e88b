//! Start introspection of nodes and wait for the results
//!
//! Reads the service URL and API version from `INSPECTOR_URL` and
//! `INSPECTOR_API_VERSION`, falling back to `http://127.0.0.1:5050` and `1.0`.
//!
//! Run with: cargo run --example introspect_and_wait -- <node> [<node>...]

use anyhow::{bail, Context};
use inspector_client::client::DEFAULT_MAX_RETRIES;
use inspector_client::v1::{server_api_versions, ClientV1, InterfaceResource};
use inspector_client::ClientConfig;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let nodes: Vec<String> = std::env::args().skip(1).collect();
    if nodes.is_empty() {
        bail!("usage: introspect_and_wait <node> [<node>...]");
    }

    println!("Inspector Client Example");
    println!("========================\n");

    let config = ClientConfig::from_env();
    let range = server_api_versions(&config).context("cannot reach inspector")?;
    println!("Server supports API {}", range);

    let client = ClientV1::new(config)?;
    println!("Using API {} at {}\n", client.api_version(), client.base_url());

    for node in &nodes {
        client
            .introspect(node, None)
            .with_context(|| format!("cannot start introspection of {}", node))?;
        println!("Started introspection of {}", node);
    }

    let statuses = client.wait_for_finish(
        &nodes,
        Duration::from_secs(10),
        DEFAULT_MAX_RETRIES,
        |delay| {
            println!("  still waiting, sleeping {:?}", delay);
            std::thread::sleep(delay);
        },
    )?;

    let resource = InterfaceResource::default();
    for (node, status) in &statuses {
        match &status.error {
            Some(error) => println!("\n{}: failed: {}", node, error),
            None => {
                println!("\n{}: finished", node);
                let rows = client.get_all_interface_data(node, resource.fields(), None)?;
                println!("  {}", resource.labels().join(" | "));
                for row in rows {
                    let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
                    println!("  {}", cells.join(" | "));
                }
            }
        }
    }

    Ok(())
}
