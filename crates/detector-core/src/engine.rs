//! Frame dispatch.
//!
//! The engine owns an ordered detector set and one sink. Each processed
//! frame is handed to every detector in construction order, so within a
//! frame the sink sees events grouped by detector in that order.
//!
//! `process` takes `&mut self`: one engine serves one producer. Hosts that
//! receive frames on several threads must serialize the calls.

use facetrigger_common::{DetectionConfig, Thresholds};
use facetrigger_signal_model::SignalFrame;

use crate::detector::{standard_detectors, Detector};
use crate::sink::EventSink;

/// Routes frames through a fixed set of detectors into a sink.
#[derive(Debug)]
pub struct Engine<S> {
    detectors: Vec<Detector>,
    sink: S,
    frames_processed: u64,
}

impl<S: EventSink> Engine<S> {
    /// Engine over an explicit detector list.
    pub fn new(detectors: Vec<Detector>, sink: S) -> Self {
        tracing::debug!(detectors = detectors.len(), "detector engine configured");
        Self {
            detectors,
            sink,
            frames_processed: 0,
        }
    }

    /// Engine over the standard detector set.
    pub fn from_config(config: &DetectionConfig, sink: S) -> Self {
        Self::new(standard_detectors(config), sink)
    }

    /// Standard detector set with the given thresholds and default policy.
    pub fn with_thresholds(thresholds: Thresholds, sink: S) -> Self {
        Self::from_config(
            &DetectionConfig {
                thresholds,
                ..Default::default()
            },
            sink,
        )
    }

    /// Standard detector set with default thresholds.
    pub fn with_defaults(sink: S) -> Self {
        Self::from_config(&DetectionConfig::default(), sink)
    }

    /// Feed one frame to every detector, in order.
    pub fn process(&mut self, frame: &SignalFrame) {
        for detector in &mut self.detectors {
            detector.evaluate(frame, &mut self.sink);
        }
        self.frames_processed += 1;
    }

    /// Feed a sequence of frames.
    pub fn process_all<'a, I>(&mut self, frames: I)
    where
        I: IntoIterator<Item = &'a SignalFrame>,
    {
        for frame in frames {
            self.process(frame);
        }
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of frames processed since construction.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}
