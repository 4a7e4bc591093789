//! `--profile-file`: a process memory snapshot written once generation
//! stops, whether it ran to the end or was interrupted.

use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Debug, Serialize)]
struct MemorySnapshot {
    pid: u32,
    rss_bytes: u64,
    virtual_memory_bytes: u64,
    total_memory_bytes: u64,
    captured_at: String,
}

impl MemorySnapshot {
    fn capture() -> io::Result<Self> {
        let pid = sysinfo::get_current_pid().map_err(io::Error::other)?;
        let sys = sysinfo::System::new_all();
        let process = sys
            .process(pid)
            .ok_or_else(|| io::Error::other(format!("process {pid} not visible")))?;

        Ok(Self {
            pid: pid.as_u32(),
            rss_bytes: process.memory(),
            virtual_memory_bytes: process.virtual_memory(),
            total_memory_bytes: sys.total_memory(),
            captured_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Profile output file, written at most once.
#[derive(Debug)]
pub struct MemoryProfile {
    file: Mutex<Option<File>>,
}

impl MemoryProfile {
    pub fn create(path: &Path) -> io::Result<Arc<Self>> {
        let file = File::create(path)?;
        Ok(Arc::new(Self {
            file: Mutex::new(Some(file)),
        }))
    }

    /// Write the snapshot. Returns `false` if it was already written.
    ///
    /// The lock is held until the file is synced, so a concurrent caller
    /// waits for a complete profile instead of racing past it.
    pub fn write_once(&self) -> io::Result<bool> {
        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(file) = guard.as_mut() else {
            return Ok(false);
        };

        let snapshot = MemorySnapshot::capture()?;
        serde_json::to_writer_pretty(&mut *file, &snapshot)?;
        writeln!(file)?;
        file.sync_all()?;
        *guard = None;

        info!(
            "Wrote memory profile: rss={} bytes, virtual={} bytes",
            snapshot.rss_bytes, snapshot.virtual_memory_bytes
        );
        Ok(true)
    }
}
