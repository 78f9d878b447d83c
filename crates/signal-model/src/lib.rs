//! FaceTrigger Signal Model
//!
//! Defines the data contracts shared by the detector core and its hosts:
//! - **Expression keys:** the tracker's fixed blend-shape set
//! - **Frames:** one tick's coefficient readings, with absent keys allowed
//! - **Streams:** JSONL recordings of timestamped frames
//! - **Triggers:** the edge-triggered events reported to the host
//!
//! Coefficients are single-precision intensities nominally in `[0.0, 1.0]`.

pub mod expression;
pub mod frame;
pub mod stream;
pub mod trigger;

pub use expression::*;
pub use frame::*;
pub use stream::*;
pub use trigger::*;
