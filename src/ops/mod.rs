// * Operations: logging setup and run summaries

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    filter_for_verbosity, init_tracing, init_tracing_pretty, init_tracing_with_level, LabelTally,
    DEFAULT_FILTER,
};
