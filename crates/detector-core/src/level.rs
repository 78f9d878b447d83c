//! Single-signal edge detection.
//!
//! A level detector turns one coefficient (or the mean of two) into a
//! boolean using a closed threshold (`value >= threshold`) and reports only
//! the flips of that boolean.

use facetrigger_signal_model::{ExpressionKey, SignalFrame, Trigger};

use crate::sink::{emit_edge, EventSink};

/// Where a level detector reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// One coefficient.
    Single(ExpressionKey),
    /// Mean of two coefficients. Both must be present.
    Average(ExpressionKey, ExpressionKey),
}

impl LevelSource {
    /// Current value, or `None` when any input is absent from the frame.
    pub fn read(&self, frame: &SignalFrame) -> Option<f32> {
        match *self {
            Self::Single(key) => frame.get(key),
            Self::Average(a, b) => Some((frame.get(a)? + frame.get(b)?) / 2.0),
        }
    }

    /// Coefficients this source depends on.
    pub fn keys(&self) -> Vec<ExpressionKey> {
        match *self {
            Self::Single(key) => vec![key],
            Self::Average(a, b) => vec![a, b],
        }
    }
}

/// Memory of the last reported state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelState {
    pub active: bool,
}

/// Edge detector over a single value.
#[derive(Debug, Clone)]
pub struct LevelDetector {
    trigger: Trigger,
    source: LevelSource,
    threshold: f32,
    state: LevelState,
}

impl LevelDetector {
    pub fn new(trigger: Trigger, source: LevelSource, threshold: f32) -> Self {
        Self {
            trigger,
            source,
            threshold,
            state: LevelState::default(),
        }
    }

    /// Feed one frame. Frames missing the source leave the state untouched
    /// and report nothing.
    pub fn evaluate(&mut self, frame: &SignalFrame, sink: &mut dyn EventSink) {
        let Some(value) = self.source.read(frame) else {
            return;
        };

        let active = value >= self.threshold;
        if active != self.state.active {
            emit_edge(sink, self.trigger, active);
        }
        self.state.active = active;
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn source(&self) -> LevelSource {
        self.source
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn state(&self) -> LevelState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::EventRecorder;
    use facetrigger_signal_model::TriggerEvent;

    fn pucker(value: f32) -> SignalFrame {
        SignalFrame::new().with(ExpressionKey::MouthPucker, value)
    }

    fn detector() -> LevelDetector {
        LevelDetector::new(
            Trigger::MouthPucker,
            LevelSource::Single(ExpressionKey::MouthPucker),
            0.7,
        )
    }

    #[test]
    fn test_reaching_threshold_emits_change_then_pulse() {
        let mut det = detector();
        let mut rec = EventRecorder::new();

        det.evaluate(&pucker(0.5), &mut rec);
        assert!(rec.is_empty());

        det.evaluate(&pucker(0.7), &mut rec);
        assert_eq!(
            rec.drain(),
            vec![
                TriggerEvent::changed(Trigger::MouthPucker, true),
                TriggerEvent::pulse(Trigger::MouthPucker),
            ]
        );

        det.evaluate(&pucker(0.7), &mut rec);
        assert!(rec.is_empty());
    }

    #[test]
    fn test_falling_edge_has_no_pulse() {
        let mut det = detector();
        let mut rec = EventRecorder::new();

        det.evaluate(&pucker(0.9), &mut rec);
        rec.clear();
        det.evaluate(&pucker(0.1), &mut rec);
        assert_eq!(
            rec.events(),
            &[TriggerEvent::changed(Trigger::MouthPucker, false)]
        );
        assert!(!det.state().active);
    }

    #[test]
    fn test_absent_key_preserves_state() {
        let mut det = detector();
        let mut rec = EventRecorder::new();

        det.evaluate(&pucker(0.8), &mut rec);
        rec.clear();

        det.evaluate(&SignalFrame::new(), &mut rec);
        assert!(rec.is_empty());
        assert!(det.state().active);

        // Still active relative to the pre-gap state: no duplicate edge.
        det.evaluate(&pucker(0.95), &mut rec);
        assert!(rec.is_empty());

        det.evaluate(&pucker(0.2), &mut rec);
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn test_average_requires_both_inputs() {
        let source = LevelSource::Average(ExpressionKey::MouthSmileLeft, ExpressionKey::MouthSmileRight);
        let half = SignalFrame::new().with(ExpressionKey::MouthSmileLeft, 1.0);
        assert_eq!(source.read(&half), None);

        let full = half.with(ExpressionKey::MouthSmileRight, 0.5);
        assert_eq!(source.read(&full), Some(0.75));
    }

    #[test]
    fn test_first_frame_below_threshold_is_silent() {
        let mut det = detector();
        let mut rec = EventRecorder::new();
        det.evaluate(&pucker(0.0), &mut rec);
        assert!(rec.is_empty());
    }
}
