//! Recorded frame streams.
//!
//! A stream is JSONL: one [`FrameRecord`] per line. Lines starting with `#`
//! are comments; by convention the first one carries a JSON
//! [`FrameStreamHeader`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use facetrigger_common::error::{FaceTriggerError, FaceTriggerResult};

use crate::frame::SignalFrame;

/// Monotonic timestamp in nanoseconds since the stream started.
pub type TimestampNs = u64;

/// Current frame stream schema version.
pub const SCHEMA_VERSION: &str = "1.0";

/// One tracking tick with its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Monotonic nanoseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Coefficients reported on this tick.
    pub coefficients: SignalFrame,
}

impl FrameRecord {
    pub fn new(timestamp_ns: TimestampNs, coefficients: SignalFrame) -> Self {
        Self {
            timestamp_ns,
            coefficients,
        }
    }

    /// Timestamp as fractional seconds since stream start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Metadata written as the first comment line of a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Free-form description of the producer (device, tool, generator).
    pub source: String,

    /// Wall-clock time the stream started.
    pub recorded_at: DateTime<Utc>,

    /// Nominal tracking rate (Hz).
    pub nominal_rate_hz: u32,
}

impl FrameStreamHeader {
    pub fn new(source: impl Into<String>, nominal_rate_hz: u32) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            recorded_at: Utc::now(),
            nominal_rate_hz,
        }
    }
}

/// Parse the header comment, if the stream has one.
pub fn parse_header(jsonl: &str) -> FaceTriggerResult<Option<FrameStreamHeader>> {
    let Some((index, line)) = jsonl
        .lines()
        .map(str::trim)
        .enumerate()
        .find(|(_, line)| !line.is_empty())
    else {
        return Ok(None);
    };

    let Some(comment) = line.strip_prefix('#').map(str::trim_start) else {
        return Ok(None);
    };
    if !comment.starts_with('{') {
        return Ok(None);
    }

    serde_json::from_str(comment)
        .map(Some)
        .map_err(|e| FaceTriggerError::frame(index + 1, format!("invalid header: {e}")))
}

/// Parse frames from JSONL content, skipping blank and comment lines.
///
/// Errors report the 1-based line number of the offending record.
pub fn parse_frames(jsonl: &str) -> FaceTriggerResult<Vec<FrameRecord>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line)
                .map_err(|e| FaceTriggerError::frame(line_no, e.to_string()))
        })
        .collect()
}

/// Serialize frames to JSONL, writing `header` as the first comment line.
pub fn serialize_frames(
    header: Option<&FrameStreamHeader>,
    frames: &[FrameRecord],
) -> FaceTriggerResult<String> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
