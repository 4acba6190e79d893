//! Wildcard publish/subscribe walkthrough
//!
//! Run with: cargo run --example wildcard_pubsub
//!
//! Set `RUST_LOG=addr_router=trace` to watch links, mirrors and evictions.

use std::sync::Arc;

use bytes::Bytes;

use addr_router::{AddressManager, AddressManagerConfig, PostOffice, QueueSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("addr_router=debug".parse()?)
                .add_directive("wildcard_pubsub=debug".parse()?),
        )
        .init();

    let manager = Arc::new(AddressManager::with_config(AddressManagerConfig::default())?);
    let office = PostOffice::new(Arc::clone(&manager));

    let (audit, mut audit_rx) = QueueSink::new("audit");
    let (eu, mut eu_rx) = QueueSink::new("eu-orders");
    let (created, mut created_rx) = QueueSink::new("created");

    manager.bind("orders.#", "audit", audit).await?;
    manager.bind("orders.eu.*", "eu", eu).await?;
    manager.bind("orders.eu.created", "created", created).await?;

    for address in [
        "orders.eu.created",
        "orders.eu.cancelled",
        "orders.us.created",
        "payments.eu",
    ] {
        let delivered = office
            .publish(address, Bytes::from(format!("event on {}", address)))
            .await;
        println!("{:<22} -> {} sink(s)", address, delivered);
    }

    println!();
    while let Ok(msg) = audit_rx.try_recv() {
        println!("audit   received {}", msg.address());
    }
    while let Ok(msg) = eu_rx.try_recv() {
        println!("eu      received {}", msg.address());
    }
    while let Ok(msg) = created_rx.try_recv() {
        println!("created received {}", msg.address());
    }

    println!();
    println!("index:   {:?}", manager.stats().await);

    manager.unbind("eu").await?;
    manager.unbind("audit").await?;
    println!("unbound: {:?}", manager.stats().await);
    println!("routing: {:?}", office.stats());

    Ok(())
}
