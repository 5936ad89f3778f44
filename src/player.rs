use std::env;
use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{BenchError, Result};

/// Environment variable used to override the player binary.
pub const PLAYER_ENV: &str = "RCBENCH_PLAYER";

const DEFAULT_PLAYER: &str = "mpv";

/// Outcome of a single player invocation: exit status plus wall-clock time.
///
/// The harness only ever looks at these two fields; the player's output is
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub success: bool,
    pub elapsed: Duration,
}

/// Seam between the harness and the external player process.
pub trait PlayerRunner {
    /// Runs one trial: fill a `cache_kib` KiB cache from `url` using reads
    /// of `chunk_size` bytes, blocking until the player exits.
    fn run(&mut self, url: &str, cache_kib: u64, chunk_size: u64) -> Result<TrialOutcome>;
}

/// Invokes an mpv-compatible player binary.
pub struct MpvRunner {
    program: OsString,
}

impl MpvRunner {
    pub fn new(program: impl Into<OsString>) -> Self {
        MpvRunner {
            program: program.into(),
        }
    }

    /// Resolves the player from `RCBENCH_PLAYER`, falling back to `mpv`.
    pub fn from_env() -> Self {
        let program = env::var_os(PLAYER_ENV).unwrap_or_else(|| DEFAULT_PLAYER.into());
        MpvRunner { program }
    }

    /// Builds the trial invocation. Output devices are disabled, playback
    /// starts only once the cache is ~99% full, and the stream is treated
    /// as unbounded so the player never waits for a duration probe.
    fn command(&self, url: &str, cache_kib: u64, chunk_size: u64) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--vo=null")
            .arg("--ao=null")
            .arg("--no-resume-playback")
            .arg(format!("--cache={}", cache_kib))
            .arg("--cache-min=99")
            .arg("--length=0")
            .arg(format!("--read-chunk={}", chunk_size))
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl PlayerRunner for MpvRunner {
    fn run(&mut self, url: &str, cache_kib: u64, chunk_size: u64) -> Result<TrialOutcome> {
        let mut cmd = self.command(url, cache_kib, chunk_size);
        let start = Instant::now();
        let status = cmd.status().map_err(|source| BenchError::PlayerSpawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;
        let elapsed = start.elapsed();
        log::debug!(
            "player exited: status={:?} cache={}KiB chunk={}B elapsed={:.3}s",
            status.code(),
            cache_kib,
            chunk_size,
            elapsed.as_secs_f64()
        );
        Ok(TrialOutcome {
            success: status.success(),
            elapsed,
        })
    }
}
