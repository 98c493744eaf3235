//! Shared data shapes passed between the collector, generator, assembler,
//! renderer, and export writer.

pub mod types;

pub use types::{
    ChartData, ChartKind, ChartSpec, Dataset, Deck, GenerationSettings, MediaKind, MediaRef,
    Slide, Theme, Tone,
};
