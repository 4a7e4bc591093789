//! The generation loop: simulator → group partition → serializer → sink.

use bench_core::Point;
use bench_generator::{Simulator, MACHINE_TAG_KEYS};
use bench_serialize::{PointSerializer, SerializeError};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Records between debug progress lines.
const PROGRESS_EVERY: u64 = 100_000;

/// Counters from one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Simulator steps, including offline hosts.
    pub points_made: u64,
    /// Records produced across all groups.
    pub records: u64,
    /// Records this process serialized.
    pub records_written: u64,
    /// Bytes the serializer wrote for those records.
    pub bytes_written: u64,
    /// The stop flag ended the run before the simulator finished.
    pub interrupted: bool,
}

/// Byte-counting adapter over the output sink.
struct CountingWriter<'a> {
    inner: &'a mut dyn Write,
    bytes: u64,
}

impl Write for CountingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Drive `sim` to completion, serializing the records owned by `group_id`.
///
/// The round-robin counter advances only on produced records, so every
/// process started with the same seed and configuration agrees on which
/// group owns which record. Callers validate the group settings first.
///
/// `stop` is checked before every step. Once it is set the loop returns
/// `Ok` with `interrupted` set, leaving `out` to be flushed by the caller.
pub fn run_simulator(
    sim: &mut dyn Simulator,
    serializer: &dyn PointSerializer,
    out: &mut dyn Write,
    group_id: u32,
    total_groups: u32,
    stop: &AtomicBool,
) -> Result<GenerationStats, SerializeError> {
    let mut stats = GenerationStats::default();
    let mut out = CountingWriter {
        inner: out,
        bytes: 0,
    };
    let mut point = Point::new();
    let mut current_group = 0u32;

    while !sim.finished() {
        if stop.load(Ordering::Relaxed) {
            stats.interrupted = true;
            debug!("Stop requested after {} records", stats.records);
            break;
        }

        let write = sim.next(&mut point);
        stats.points_made += 1;
        if !write {
            point.reset();
            continue;
        }

        if current_group == group_id {
            serializer.serialize(&point, &mut out)?;
            stats.records_written += 1;
        }
        point.reset();

        stats.records += 1;
        if stats.records % PROGRESS_EVERY == 0 {
            debug!(
                "Generated {} records ({} written)",
                stats.records, stats.records_written
            );
        }

        current_group = (current_group + 1) % total_groups;
    }

    stats.bytes_written = out.bytes;
    Ok(stats)
}

/// Write the schema header that table-oriented formats load before data:
/// the tag keys, then one line per measurement in ascending name order with
/// its field names, then a blank line.
pub fn write_schema_preamble(
    fields: &HashMap<&'static str, Vec<&'static str>>,
    out: &mut dyn Write,
) -> io::Result<()> {
    write!(out, "tags")?;
    for key in MACHINE_TAG_KEYS {
        write!(out, ",{key}")?;
    }
    writeln!(out)?;

    let mut measurements: Vec<&&str> = fields.keys().collect();
    measurements.sort();
    for name in measurements {
        write!(out, "{name}")?;
        for field in &fields[*name] {
            write!(out, ",{field}")?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}
