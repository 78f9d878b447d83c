//! Write synthetic frame streams for scripted expressions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use facetrigger_common::DetectionConfig;
use facetrigger_detector_core::standard_detectors;
use facetrigger_signal_model::{
    serialize_frames, ExpressionKey, FrameRecord, FrameStreamHeader, SignalFrame, TimestampNs,
};

/// Resting value for every detector input.
const BASELINE: f32 = 0.05;

/// Fraction of each blink cycle spent with the eye closed.
const CLOSED_FRACTION: f64 = 0.15;

const CLOSED: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Blink,
    WinkLeft,
    WinkRight,
    Smile,
}

impl Pattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blink => "blink",
            Self::WinkLeft => "wink-left",
            Self::WinkRight => "wink-right",
            Self::Smile => "smile",
        }
    }

    fn apply(self, phase: f64, frame: &mut SignalFrame) {
        let closed = phase < CLOSED_FRACTION;
        match self {
            Self::Blink if closed => {
                frame.insert(ExpressionKey::EyeBlinkLeft, CLOSED);
                frame.insert(ExpressionKey::EyeBlinkRight, CLOSED);
            }
            // Tracker keys are camera-relative: the user's left eye is the
            // tracker's right.
            Self::WinkLeft if closed => {
                frame.insert(ExpressionKey::EyeBlinkRight, CLOSED);
            }
            Self::WinkRight if closed => {
                frame.insert(ExpressionKey::EyeBlinkLeft, CLOSED);
            }
            Self::Smile => {
                let level = (1.0 - (2.0 * phase - 1.0).abs()) as f32;
                frame.insert(ExpressionKey::MouthSmileLeft, level);
                frame.insert(ExpressionKey::MouthSmileRight, level);
            }
            _ => {}
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blink" => Ok(Self::Blink),
            "wink-left" => Ok(Self::WinkLeft),
            "wink-right" => Ok(Self::WinkRight),
            "smile" => Ok(Self::Smile),
            other => Err(format!(
                "unknown pattern '{other}' (expected blink|wink-left|wink-right|smile)"
            )),
        }
    }
}

/// Generate `duration_secs` of frames at `rate` Hz, one expression per
/// `period_secs`.
pub fn generate(
    pattern: Pattern,
    rate: u32,
    duration_secs: f64,
    period_secs: f64,
) -> Vec<FrameRecord> {
    let keys: Vec<ExpressionKey> = {
        let mut keys: Vec<_> = standard_detectors(&DetectionConfig::default())
            .iter()
            .flat_map(|d| d.keys())
            .collect();
        keys.sort();
        keys.dedup();
        keys
    };

    let count = (duration_secs * rate as f64).round() as u64;
    (0..count)
        .map(|i| {
            let t = i as f64 / rate as f64;
            let phase = (t % period_secs) / period_secs;

            let mut frame: SignalFrame = keys.iter().map(|&k| (k, BASELINE)).collect();
            pattern.apply(phase, &mut frame);

            let timestamp_ns: TimestampNs = i * 1_000_000_000 / rate as u64;
            FrameRecord::new(timestamp_ns, frame)
        })
        .collect()
}

pub fn run(
    output: PathBuf,
    pattern: String,
    rate: u32,
    duration_secs: f64,
    period_secs: f64,
) -> anyhow::Result<()> {
    let pattern: Pattern = pattern.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    if rate == 0 {
        anyhow::bail!("Frame rate must be positive");
    }
    if !(duration_secs > 0.0 && period_secs > 0.0) {
        anyhow::bail!("Duration and period must be positive");
    }

    let frames = generate(pattern, rate, duration_secs, period_secs);
    let header = FrameStreamHeader::new(format!("synth:{pattern}"), rate);
    let content = serialize_frames(Some(&header), &frames)
        .map_err(|e| anyhow::anyhow!("Failed to serialize frames: {e}"))?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output, content)?;

    tracing::debug!(frames = frames.len(), %pattern, "synthetic stream written");
    println!(
        "Wrote {} frames ({pattern}, {rate}Hz) to {}",
        frames.len(),
        output.display()
    );
    Ok(())
}
