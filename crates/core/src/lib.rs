#![deny(unsafe_code)]
//! Core types for hue-sort: sorting images into folders by dominant hue.
//!
//! Provides the `PixelGrid` sample grid, `Rgb`/`Hsv` colors, the weighted
//! `HueHistogram`, the `classify` function that finds a dominant hue with a
//! diagnostic `Reason`, and the `label` mapping onto a fixed set of
//! `ColorLabel`s. Nothing here touches the file system except
//! `ClassifierConfig::from_json_file`.

pub mod classifier;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod label;
pub mod params;

pub use classifier::{classify, Classification, Reason};
pub use color::{rgb_to_hsv, Hsv, Rgb};
pub use config::ClassifierConfig;
pub use error::SortError;
pub use grid::PixelGrid;
pub use histogram::HueHistogram;
pub use label::{hue_to_label, label, ColorLabel, HueRange, HUE_RANGES};
