//! Synthetic cybercrime complaint dataset: generation and exploratory analysis.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod rng;
pub mod stats;
pub mod types;
