//! Core data types shared across the policy engine.

pub mod geometry;

pub use geometry::{Point, Rect, Size};
