pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod outputs;
pub mod sources;
