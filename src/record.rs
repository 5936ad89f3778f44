use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};

/// First line of every measurement file.
pub const HEADER: &str = "read-chunk kbps";

/// One timed trial result: read granularity and achieved fill throughput.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Read-chunk size in bytes.
    pub chunk_size: u64,
    /// Cache-fill throughput in KiB/s.
    pub kbps: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.chunk_size, self.kbps)
    }
}

/// Sequential writer for a measurement file. Writes the header on creation,
/// then one record per line. No rewrites, no partial-write recovery.
pub struct MeasurementWriter {
    out: BufWriter<File>,
}

impl MeasurementWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{}", HEADER)?;
        Ok(MeasurementWriter { out })
    }

    pub fn append(&mut self, record: &Measurement) -> Result<()> {
        writeln!(self.out, "{}", record)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Reads a measurement file back, skipping the header line.
pub fn read_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            // Header line, skipped without validation.
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || BenchError::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            text: line.clone(),
        };
        let mut cols = line.split_whitespace();
        let chunk_size = cols
            .next()
            .and_then(|c| c.parse::<u64>().ok())
            .ok_or_else(malformed)?;
        let kbps = cols
            .next()
            .and_then(|c| c.parse::<f64>().ok())
            .ok_or_else(malformed)?;
        records.push(Measurement { chunk_size, kbps });
    }
    Ok(records)
}

/// Makes a string safe as a Unix filename: lowercase, with every run of
/// characters outside `[a-z0-9._-]` collapsed to a single underscore.
pub fn unix_friendly(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Derives the measurement filename for a sweep over
/// `2^minpow .. 2^(minpow+npow-1)` byte chunks of `url`.
pub fn output_name(url: &str, minpow: u32, npow: u32) -> PathBuf {
    PathBuf::from(format!("{}_{:02}_{:02}", unix_friendly(url), minpow, npow))
}
