// * Review sentiment pipeline
// * Scrapes review text, scores it with a lexicon model and a pretrained star classifier,
// * fuses the two verdicts and exports one CSV record per text sample.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod network;
pub mod ops;
pub mod persistence;
pub mod refinery;
pub mod sentiment;
