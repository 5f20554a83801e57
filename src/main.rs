// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use std::env;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use stagewise::config::{load_and_validate_config, RuntimeBuilder};
use stagewise::engine::{drain, materialize, RunContext};
use stagewise::stages::{InMemoryProducer, InMemoryUserStore, UserData};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <config.yaml> <name> <email>", args[0]);
        eprintln!("Example: {} configs/registration.yaml \"Ada\" ada@example.com", args[0]);
        bail!("expected 3 arguments, got {}", args.len().saturating_sub(1));
    }

    let config_file = &args[1];
    let user = UserData::new(args[2].as_str(), args[3].as_str());

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("loading {}", config_file))?;

    let producer = Arc::new(InMemoryProducer::new());
    let store = Arc::new(InMemoryUserStore::new());
    let runtime = RuntimeBuilder::from_config(&config, producer.clone(), store.clone())?;

    println!("📋 Configuration: {}", config_file);
    println!("🔧 Strategy: {}", runtime.pipeline.strategy());
    println!("🧱 Stages: {}", runtime.pipeline.stage_names().join(" -> "));
    println!("👤 Input: {:?}", user);

    let ctx = RunContext::new();
    let started = Instant::now();
    let streams = runtime
        .pipeline
        .execute(&ctx, materialize(vec![user.clone()]))
        .await;
    let drained = drain(&ctx, streams).await;

    println!("\n📊 Stream pipeline ({:?}, trace {}):", started.elapsed(), ctx.trace_id());
    for item in &drained.items {
        println!("  ✅ {:?}", item);
    }
    for error in &drained.errors {
        println!("  ❌ [{}] {}", error.stage(), error);
    }
    if drained.items.is_empty() && drained.errors.is_empty() {
        println!("  (no output)");
    }

    if !runtime.short_circuit.stage_names().is_empty() {
        println!(
            "\n⛓️  Short-circuit: {}",
            runtime.short_circuit.stage_names().join(" -> ")
        );
        match runtime.short_circuit.run(&ctx, user).await {
            Ok(result) => println!("  ✅ {:?}", result),
            Err(e) => println!("  ❌ {} (last good: {:?})", e, e.last_good),
        }
    }

    println!("\n📨 Produced messages:");
    for message in producer.messages().await {
        println!(
            "  [{}] {}",
            message.topic,
            String::from_utf8_lossy(&message.payload)
        );
    }
    println!("🗄️  Stored users: {}", store.users().await.len());

    Ok(())
}
