//! FaceTrigger Detector Core
//!
//! Turns per-frame blend-shape coefficients into edge-triggered events:
//! - **Level detectors:** one value (or a mean of two) against a threshold
//! - **Paired detectors:** left/right/compound signals with mirrored sides
//! - **Engine:** ordered dispatch of every frame to every detector
//! - **Sinks:** host callbacks, each optional
//!
//! This crate is pure computation. Nothing here fails: frames with missing
//! or unknown keys simply produce fewer events.

pub mod detector;
pub mod engine;
pub mod level;
pub mod paired;
pub mod recorder;
pub mod sink;

pub use detector::{standard_detectors, Detector};
pub use engine::Engine;
pub use level::{LevelDetector, LevelSource, LevelState};
pub use paired::{PairedDetector, PairedState, PairedTriggers};
pub use recorder::EventRecorder;
pub use sink::EventSink;
