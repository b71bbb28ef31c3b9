use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pandaquery::cli::Args;
use pandaquery::graph::Export;
use pandaquery::{Engine, Environment, MemoryGraph, ResultBundle, Settings};

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    bundle: &'a ResultBundle,
    environment: &'a Environment,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> pandaquery::Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let graph = match args.graph.clone().or_else(|| settings.graph.clone()) {
        Some(path) => {
            info!(path = %path.display(), "loading graph");
            MemoryGraph::from_path(&path)?
        }
        None => {
            warn!("no graph configured, searching an empty graph");
            MemoryGraph::new(Export::default())
        }
    };
    let engine = Engine::new(&graph, &settings)?;
    let mut env = Environment::new();

    if let Some(query) = args.query() {
        return search(&engine, &mut env, &query);
    }
    // one query per line
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        search(&engine, &mut env, &line)?;
    }
    Ok(())
}

fn search(engine: &Engine, env: &mut Environment, query: &str) -> pandaquery::Result<()> {
    env.reset();
    let started = Instant::now();
    match engine.parse(query, env) {
        Ok(bundle) => {
            let ms = started.elapsed().as_secs_f64() * 1000.0;
            info!(ms, hits = bundle.hits.len(), parsed = ?bundle.parsed, "query complete");
            let output = Output {
                bundle: &bundle,
                environment: env,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => warn!(%e, query, "query error"),
    }
    Ok(())
}
