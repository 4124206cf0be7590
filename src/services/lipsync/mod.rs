//! Phoneme timings to frame-indexed mouth shapes.

pub mod timeline;
pub mod viseme;

pub use timeline::{quantize, quantize_ms, Timeline, FRAME_PERIOD_MS, SIDECAR_EXTENSION};
pub use viseme::{mouth_shape, MouthShape};
