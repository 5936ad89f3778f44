use clap::{Parser, Subcommand};
use read_chunk_bench::Result;

mod handlers;

#[derive(Parser)]
#[command(name = "rcbench")]
#[command(about = "Read-chunk throughput benchmark for remote media streams", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep read-chunk sizes against a stream URL and record throughput
    #[command(aliases = &["m"])]
    Measure {
        /// Stream source to benchmark (e.g. smb://host/share/large-file)
        url: String,
    },

    /// Render one or more measurement files as a log-log scatter plot
    #[command(aliases = &["p"])]
    Plot {
        /// Measurement files with legend labels, as path=label
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Measure { url } => {
            handlers::handle_measure(&url)?;
        }
        Commands::Plot { inputs } => {
            handlers::handle_plot(&inputs)?;
        }
    }

    Ok(())
}
