//! Chat-completion client for Groq's OpenAI-compatible endpoint.

pub mod client;

pub use client::{GroqClient, GroqError, DEFAULT_MODEL};
