//! Core pipeline: repository data collection, AI slide generation, and deck
//! assembly, plus the background task that drives them in sequence.

pub mod assemble;
pub mod config;
pub mod demo;
pub mod error;
pub mod generate;
pub mod github;
pub mod pipeline;

pub use config::Config;
pub use error::{CollectError, GenerateError};
