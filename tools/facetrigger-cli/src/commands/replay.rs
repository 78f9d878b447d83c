//! Replay a recorded frame stream through the detector engine.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use facetrigger_common::config::{AppConfig, PairedPolicy, Thresholds};
use facetrigger_detector_core::{Engine, EventRecorder};
use facetrigger_signal_model::{parse_frames, TimestampNs, TriggerEvent};

/// Per-detector threshold overrides.
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Smile threshold (mean of both mouth corners)
    #[arg(long)]
    smile: Option<f32>,

    /// Blink threshold
    #[arg(long)]
    blink: Option<f32>,

    /// Brow-down threshold
    #[arg(long)]
    brow_down: Option<f32>,

    /// Brow-up threshold
    #[arg(long)]
    brow_up: Option<f32>,

    /// Mouth-pucker threshold
    #[arg(long)]
    mouth_pucker: Option<f32>,

    /// Jaw-open threshold
    #[arg(long)]
    jaw_open: Option<f32>,

    /// Squint threshold
    #[arg(long)]
    squint: Option<f32>,

    /// Cheek-puff threshold
    #[arg(long)]
    cheek_puff: Option<f32>,

    /// Jaw-left threshold
    #[arg(long)]
    jaw_left: Option<f32>,

    /// Jaw-right threshold
    #[arg(long)]
    jaw_right: Option<f32>,
}

impl ThresholdArgs {
    pub fn apply(&self, thresholds: &mut Thresholds) {
        let overrides = [
            (self.smile, &mut thresholds.smile),
            (self.blink, &mut thresholds.blink),
            (self.brow_down, &mut thresholds.brow_down),
            (self.brow_up, &mut thresholds.brow_up),
            (self.mouth_pucker, &mut thresholds.mouth_pucker),
            (self.jaw_open, &mut thresholds.jaw_open),
            (self.squint, &mut thresholds.squint),
            (self.cheek_puff, &mut thresholds.cheek_puff),
            (self.jaw_left, &mut thresholds.jaw_left),
            (self.jaw_right, &mut thresholds.jaw_right),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Serialize)]
struct TimedEvent {
    #[serde(rename = "t")]
    timestamp_ns: TimestampNs,

    #[serde(flatten)]
    event: TriggerEvent,
}

pub fn run(
    path: PathBuf,
    mut config: AppConfig,
    overrides: ThresholdArgs,
    policy: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    overrides.apply(&mut config.detection.thresholds);
    if let Some(policy) = policy {
        config.detection.paired_policy = policy
            .parse::<PairedPolicy>()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }
    config
        .detection
        .thresholds
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid thresholds: {e}"))?;

    let content = super::read_frames_file(&path)?;
    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse frames: {e}"))?;

    tracing::info!(
        frames = frames.len(),
        policy = %config.detection.paired_policy,
        "replaying {}",
        path.display()
    );

    let mut engine = Engine::from_config(&config.detection, EventRecorder::new());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut total = 0usize;

    for record in &frames {
        engine.process(&record.coefficients);
        for event in engine.sink_mut().drain() {
            total += 1;
            if json {
                let line = serde_json::to_string(&TimedEvent {
                    timestamp_ns: record.timestamp_ns,
                    event,
                })?;
                writeln!(out, "{line}")?;
            } else {
                writeln!(out, "{:>10.3}s  {event}", record.timestamp_secs())?;
            }
        }
    }

    if !json {
        writeln!(
            out,
            "\nReplayed {} frames ({} policy): {} events.",
            engine.frames_processed(),
            config.detection.paired_policy,
            total
        )?;
    }

    Ok(())
}
