use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::player::PlayerRunner;
use crate::record::{output_name, Measurement, MeasurementWriter};

/// Cache size used for the first trial of each sweep, in KiB.
pub const INITIAL_CACHE_KIB: u64 = 32;

/// Minimum trial duration before a throughput sample is accepted.
pub const DEFAULT_TARGET: Duration = Duration::from_secs(2);

/// Playback starts once the cache is ~99% full, so a trial transfers
/// roughly this fraction of the configured cache size.
const CACHE_FILL: f64 = 0.99;

/// Drives the external player through timed trials, owning the auto-scaling
/// cache size. The cache warm-starts across chunk sizes within one sweep
/// and resets to [`INITIAL_CACHE_KIB`] between sweeps.
pub struct Harness<R: PlayerRunner> {
    runner: R,
    target: Duration,
    cache_kib: u64,
}

impl<R: PlayerRunner> Harness<R> {
    pub fn new(runner: R) -> Self {
        Self::with_target(runner, DEFAULT_TARGET)
    }

    pub fn with_target(runner: R, target: Duration) -> Self {
        Harness {
            runner,
            target,
            cache_kib: INITIAL_CACHE_KIB,
        }
    }

    /// Current cache size in KiB.
    pub fn cache_kib(&self) -> u64 {
        self.cache_kib
    }

    /// Runs timed trials for one (url, chunk_size) pair, doubling the cache
    /// until a successful trial lasts at least the target duration.
    ///
    /// A failing player stops the loop immediately and that attempt's
    /// elapsed time is still used for the reported throughput, so a short
    /// failed trial is indistinguishable from a short successful one in
    /// the output. Files produced by earlier versions of this tool carry
    /// the same quirk.
    pub fn time_read_chunk(&mut self, url: &str, chunk_size: u64) -> Result<Measurement> {
        let mut elapsed;
        loop {
            let outcome = self.runner.run(url, self.cache_kib, chunk_size)?;
            elapsed = outcome.elapsed;
            if !outcome.success {
                // Likely an unreachable URL or a cache the player refuses;
                // no point growing further for this chunk size.
                log::debug!(
                    "player failed at cache={}KiB chunk={}B, keeping last timing",
                    self.cache_kib,
                    chunk_size
                );
                break;
            }
            if elapsed < self.target {
                self.cache_kib *= 2;
                continue;
            }
            break;
        }

        let secs = elapsed.as_secs_f64();
        if secs <= f64::EPSILON {
            return Err(BenchError::InstantExit {
                url: url.to_string(),
                cache_kib: self.cache_kib,
            });
        }
        Ok(Measurement {
            chunk_size,
            kbps: self.cache_kib as f64 * CACHE_FILL / secs,
        })
    }

    /// Sweeps chunk sizes `2^minpow .. 2^(minpow+npow-1)`, repeating each
    /// size `cycles` times, appending every sample to a measurement file in
    /// `out_dir`. Returns the file's path.
    pub fn time_read_chunks(
        &mut self,
        url: &str,
        minpow: u32,
        npow: u32,
        cycles: u32,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        self.cache_kib = INITIAL_CACHE_KIB;

        let path = out_dir.join(output_name(url, minpow, npow));
        let mut writer = MeasurementWriter::create(&path)?;
        for i in 0..npow {
            let chunk_size = 1u64 << (minpow + i);
            log::info!("measuring {} with {}-byte chunks", url, chunk_size);
            for _ in 0..cycles {
                let record = self.time_read_chunk(url, chunk_size)?;
                writer.append(&record)?;
            }
        }
        writer.finish()?;
        Ok(path)
    }
}
