// * Orchestration: fragment source -> pipeline -> records

pub mod pipeline;
pub mod workflow;

// * Re-exports for convenient access
pub use pipeline::SentimentPipeline;
pub use workflow::{ingest_file, ingest_text, scrape, ScrapeOutcome};
