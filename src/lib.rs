//! Reducir - command-line runner for Barnes-Hut t-SNE embeddings
//!
//! This library provides the pieces around the external embedding
//! engine: dataset loading with observation truncation, hyperparameter
//! resolution with the opt-SNE learning-rate rule, the engine boundary,
//! and CSV persistence with a write-failure fallback.

pub mod cli;
pub mod dataset;
pub mod engine;
pub mod output;
pub mod params;
