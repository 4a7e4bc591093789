//! `generate-data` command.

pub mod args;
pub mod config;
pub mod driver;
pub mod interrupt;
pub mod profile;

pub use args::GenerateDataArgs;
pub use config::{validate_groups, GenerateDataConfig, UseCase};
pub use driver::{run_simulator, write_schema_preamble, GenerationStats};
pub use interrupt::spawn_interrupt_listener;
pub use profile::MemoryProfile;

use anyhow::Context;
use bench_serialize::SerializeError;
use std::io::{BufWriter, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Output buffer size for stdout.
pub const OUTPUT_BUFFER_SIZE: usize = 4 << 20;

/// Build the simulator and serializer for `config` and stream this group's
/// records into `out`, preceded by the schema preamble when the format
/// needs one. Stops early once `stop` is set.
pub fn generate(
    config: &GenerateDataConfig,
    out: &mut dyn Write,
    stop: &AtomicBool,
) -> Result<GenerationStats, SerializeError> {
    let mut sim = config.simulator_config().to_simulator(config.interval);
    let serializer = config.format.serializer();

    if config.format.requires_schema_preamble() {
        write_schema_preamble(&sim.fields(), out)?;
    }

    run_simulator(
        sim.as_mut(),
        serializer.as_ref(),
        out,
        config.group_id,
        config.total_groups,
        stop,
    )
}

/// [`generate`] through an [`OUTPUT_BUFFER_SIZE`] buffer over `sink`. The
/// buffer is flushed whether generation finished or was stopped.
pub fn generate_buffered<W: Write>(
    config: &GenerateDataConfig,
    sink: W,
    stop: &AtomicBool,
) -> Result<GenerationStats, SerializeError> {
    let mut out = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, sink);
    let stats = generate(config, &mut out, stop)?;
    out.flush()?;
    Ok(stats)
}

/// Run the command: validate, generate to stdout, write the profile.
pub async fn run_generate_data(args: GenerateDataArgs) -> anyhow::Result<()> {
    let config = GenerateDataConfig::from_args(&args)?;
    info!("using random seed {}", config.seed);
    info!(
        "Generating {} data as {} for {}→{} hosts from {} to {} (group {}/{})",
        config.use_case,
        config.format,
        config.init_scale,
        config.scale,
        config.start,
        config.end,
        config.group_id,
        config.total_groups
    );

    let profile = match &config.profile_file {
        Some(path) => Some(
            MemoryProfile::create(path)
                .with_context(|| format!("could not create memory profile {path:?}"))?,
        ),
        None => None,
    };

    let stop = Arc::new(AtomicBool::new(false));
    let listener = spawn_interrupt_listener(stop.clone());

    let start_time = Instant::now();
    let stats = tokio::task::spawn_blocking(move || -> anyhow::Result<GenerationStats> {
        generate_buffered(&config, std::io::stdout().lock(), &stop)
            .context("Failed to write generated data")
    })
    .await
    .context("Generation task panicked")??;
    listener.abort();

    if stats.interrupted {
        warn!(
            "Generation interrupted after {} records; output is partial",
            stats.records
        );
    }

    info!(
        "Generation complete: {} points made, {} records, {} written ({} bytes) in {:?}",
        stats.points_made,
        stats.records,
        stats.records_written,
        stats.bytes_written,
        start_time.elapsed()
    );

    if let Some(profile) = profile {
        profile
            .write_once()
            .context("could not write memory profile")?;
    }
    Ok(())
}
