use std::path::Path;

use read_chunk_bench::plot::plot_files;
use read_chunk_bench::{Harness, MpvRunner, PlotInput, Result};

// Sweep constants: 2^11 (2 KiB) through 2^24 (16 MiB) chunks, ten samples
// each. Not exposed as flags in this version.
const MINPOW: u32 = 11;
const NPOW: u32 = 14;
const CYCLES: u32 = 10;

/// Runs the fixed chunk-size sweep against `url` and reports the output file.
pub fn handle_measure(url: &str) -> Result<()> {
    let mut harness = Harness::new(MpvRunner::from_env());
    let path = harness.time_read_chunks(url, MINPOW, NPOW, CYCLES, Path::new("."))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Parses all `path=label` arguments, then renders them into one PNG.
pub fn handle_plot(inputs: &[String]) -> Result<()> {
    // Every argument is validated before any file is opened.
    let inputs = inputs
        .iter()
        .map(|s| s.parse::<PlotInput>())
        .collect::<Result<Vec<_>>>()?;
    let path = plot_files(&inputs, Path::new("."))?;
    println!("Wrote {}", path.display());
    Ok(())
}
