//! Domain services for the circle bridge.

pub mod circle_source;

pub use circle_source::{CircleSource, MockCircleSource, SourceError};
