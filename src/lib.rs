pub mod error;
pub mod harness;
pub mod player;
pub mod plot;
pub mod record;


pub use error::{BenchError, Result};
pub use harness::Harness;
pub use player::{MpvRunner, PlayerRunner, TrialOutcome};
pub use plot::PlotInput;
pub use record::Measurement;
