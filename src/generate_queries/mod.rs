//! `generate-queries` command: one JSON object per query on stdout.

pub mod args;
pub mod config;

pub use args::GenerateQueriesArgs;
pub use config::GenerateQueriesConfig;

use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use tracing::{debug, info};

/// Generate `config.queries` queries into `out`, returning how many were
/// produced per human label.
pub fn generate_queries(
    config: &GenerateQueriesConfig,
    out: &mut dyn Write,
) -> anyhow::Result<BTreeMap<String, u64>> {
    let build = config.factory()?;
    let mut generator = build(&config.database, config.start, config.end)?;

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for i in 0..config.queries {
        let query = generator
            .dispatch(config.scale)
            .with_context(|| format!("Failed to generate query {i}"))?;
        serde_json::to_writer(&mut *out, &query.to_json()?)?;
        writeln!(out)?;

        match counts.get_mut(query.human_label()) {
            Some(n) => *n += 1,
            None => {
                counts.insert(query.human_label().to_string(), 1);
            }
        }
        debug!("{}", query.human_description());
    }
    Ok(counts)
}

pub async fn run_generate_queries(args: GenerateQueriesArgs) -> anyhow::Result<()> {
    let config = GenerateQueriesConfig::from_args(&args)?;
    info!("using random seed {}", config.database.seed);
    info!(
        "Generating {} {} queries for {} on {} hosts",
        config.queries, config.query_type, config.format, config.scale
    );

    let counts = tokio::task::spawn_blocking(move || -> anyhow::Result<BTreeMap<String, u64>> {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let counts = generate_queries(&config, &mut out)?;
        out.flush().context("Failed to flush output")?;
        Ok(counts)
    })
    .await
    .context("Query generation task panicked")??;

    for (label, count) in &counts {
        info!("{label}: {count} queries");
    }
    Ok(())
}
