//! Two-sided edge detection (blink, brow-down, squint).
//!
//! A paired detector watches a bilateral expression and reports three
//! signals: the user's left side, the user's right side, and the compound
//! "both sides" signal.
//!
//! The tracker labels sides as seen in its image, which is the mirror of
//! the user's own view. The user's left side is therefore read from the
//! tracker's *right* key and vice versa.

use facetrigger_common::PairedPolicy;
use facetrigger_signal_model::{ExpressionKey, SignalFrame, Trigger};

use crate::sink::{emit_edge, EventSink};

/// Triggers reported by a paired detector, one per signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedTriggers {
    pub both: Trigger,
    pub left: Trigger,
    pub right: Trigger,
}

/// Memory of the last computed booleans, sides in user orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairedState {
    pub left: bool,
    pub right: bool,
    pub both: bool,
}

/// Edge detector over a left/right coefficient pair.
#[derive(Debug, Clone)]
pub struct PairedDetector {
    tracker_left: ExpressionKey,
    tracker_right: ExpressionKey,
    threshold: f32,
    triggers: PairedTriggers,
    policy: PairedPolicy,
    state: PairedState,
}

impl PairedDetector {
    /// `tracker_left` and `tracker_right` are the tracker's own labels
    /// (e.g. `EyeBlinkLeft`, `EyeBlinkRight`); the mirror swap is applied
    /// internally.
    pub fn new(
        threshold: f32,
        tracker_left: ExpressionKey,
        tracker_right: ExpressionKey,
        triggers: PairedTriggers,
    ) -> Self {
        Self {
            tracker_left,
            tracker_right,
            threshold,
            triggers,
            policy: PairedPolicy::default(),
            state: PairedState::default(),
        }
    }

    pub fn with_policy(mut self, policy: PairedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Feed one frame.
    pub fn evaluate(&mut self, frame: &SignalFrame, sink: &mut dyn EventSink) {
        match self.policy {
            PairedPolicy::Prioritized => self.evaluate_prioritized(frame, sink),
            PairedPolicy::Independent => self.evaluate_independent(frame, sink),
        }
    }

    /// At most one edge per frame, compound first. Absent sides count as
    /// inactive. All three booleans are stored whichever branch reported.
    fn evaluate_prioritized(&mut self, frame: &SignalFrame, sink: &mut dyn EventSink) {
        let left = self.is_active(frame.get(self.tracker_right));
        let right = self.is_active(frame.get(self.tracker_left));
        let both = left && right;

        if both != self.state.both {
            emit_edge(sink, self.triggers.both, both);
        } else if left != self.state.left {
            emit_edge(sink, self.triggers.left, left);
        } else if right != self.state.right {
            emit_edge(sink, self.triggers.right, right);
        }

        self.state = PairedState { left, right, both };
    }

    /// Each present side reports its own edge; the compound is only
    /// re-evaluated when both sides are present. Absent sides keep state.
    fn evaluate_independent(&mut self, frame: &SignalFrame, sink: &mut dyn EventSink) {
        let user_right = frame.get(self.tracker_left);
        let user_left = frame.get(self.tracker_right);

        if let Some(value) = user_right {
            let right = value >= self.threshold;
            if right != self.state.right {
                emit_edge(sink, self.triggers.right, right);
            }
            self.state.right = right;
        }

        if let Some(value) = user_left {
            let left = value >= self.threshold;
            if left != self.state.left {
                emit_edge(sink, self.triggers.left, left);
            }
            self.state.left = left;
        }

        if user_left.is_some() && user_right.is_some() {
            let both = self.state.left && self.state.right;
            if both != self.state.both {
                emit_edge(sink, self.triggers.both, both);
            }
            self.state.both = both;
        }
    }

    fn is_active(&self, value: Option<f32>) -> bool {
        value.is_some_and(|v| v >= self.threshold)
    }

    pub fn triggers(&self) -> PairedTriggers {
        self.triggers
    }

    /// Tracker keys as `(left, right)` in the tracker's labelling.
    pub fn tracker_keys(&self) -> (ExpressionKey, ExpressionKey) {
        (self.tracker_left, self.tracker_right)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn policy(&self) -> PairedPolicy {
        self.policy
    }

    pub fn state(&self) -> PairedState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::EventRecorder;
    use facetrigger_signal_model::TriggerEvent;

    const BLINK: PairedTriggers = PairedTriggers {
        both: Trigger::Blink,
        left: Trigger::BlinkLeft,
        right: Trigger::BlinkRight,
    };

    fn blink_detector(policy: PairedPolicy) -> PairedDetector {
        PairedDetector::new(0.8, ExpressionKey::EyeBlinkLeft, ExpressionKey::EyeBlinkRight, BLINK)
            .with_policy(policy)
    }

    /// Frame in user orientation: `left` goes to the tracker's right key.
    fn eyes(left: f32, right: f32) -> SignalFrame {
        SignalFrame::new()
            .with(ExpressionKey::EyeBlinkRight, left)
            .with(ExpressionKey::EyeBlinkLeft, right)
    }

    fn run(det: &mut PairedDetector, frames: &[SignalFrame]) -> Vec<TriggerEvent> {
        let mut rec = EventRecorder::new();
        for frame in frames {
            det.evaluate(frame, &mut rec);
        }
        rec.into_events()
    }

    #[test]
    fn test_compound_takes_priority_over_side() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let mut rec = EventRecorder::new();

        det.evaluate(&eyes(0.9, 0.2), &mut rec);
        rec.clear();

        det.evaluate(&eyes(0.9, 0.9), &mut rec);
        assert_eq!(
            rec.events(),
            &[
                TriggerEvent::changed(Trigger::Blink, true),
                TriggerEvent::pulse(Trigger::Blink),
            ]
        );
        assert_eq!(
            det.state(),
            PairedState {
                left: true,
                right: true,
                both: true
            }
        );
    }

    #[test]
    fn test_single_side_edge() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let events = run(&mut det, &[eyes(0.2, 0.2), eyes(0.9, 0.2)]);
        assert_eq!(
            events,
            vec![
                TriggerEvent::changed(Trigger::BlinkLeft, true),
                TriggerEvent::pulse(Trigger::BlinkLeft),
            ]
        );
    }

    #[test]
    fn test_tracker_right_key_drives_user_left() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let raw = SignalFrame::new()
            .with(ExpressionKey::EyeBlinkRight, 1.0)
            .with(ExpressionKey::EyeBlinkLeft, 0.0);
        let events = run(&mut det, &[raw]);
        assert_eq!(events[0], TriggerEvent::changed(Trigger::BlinkLeft, true));

        let mut det = blink_detector(PairedPolicy::Prioritized);
        let raw = SignalFrame::new().with(ExpressionKey::EyeBlinkLeft, 1.0);
        let events = run(&mut det, &[raw]);
        assert_eq!(events[0], TriggerEvent::changed(Trigger::BlinkRight, true));
    }

    #[test]
    fn test_simultaneous_sides_without_compound_change_reports_left_only() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let events = run(&mut det, &[eyes(0.9, 0.1), eyes(0.1, 0.9)]);
        assert_eq!(
            events,
            vec![
                TriggerEvent::changed(Trigger::BlinkLeft, true),
                TriggerEvent::pulse(Trigger::BlinkLeft),
                TriggerEvent::changed(Trigger::BlinkLeft, false),
            ]
        );
        // The right edge was swallowed but the state still moved on.
        assert!(det.state().right);
    }

    #[test]
    fn test_compound_release_suppresses_side_report() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let events = run(&mut det, &[eyes(0.9, 0.9), eyes(0.9, 0.1), eyes(0.1, 0.1)]);
        assert_eq!(
            events,
            vec![
                TriggerEvent::changed(Trigger::Blink, true),
                TriggerEvent::pulse(Trigger::Blink),
                TriggerEvent::changed(Trigger::Blink, false),
                TriggerEvent::changed(Trigger::BlinkLeft, false),
            ]
        );
    }

    #[test]
    fn test_missing_side_counts_as_inactive() {
        let mut det = blink_detector(PairedPolicy::Prioritized);
        let only_left = SignalFrame::new().with(ExpressionKey::EyeBlinkRight, 0.95);
        let events = run(&mut det, &[eyes(0.9, 0.9), only_left]);
        assert_eq!(events.last(), Some(&TriggerEvent::changed(Trigger::Blink, false)));
        assert_eq!(
            det.state(),
            PairedState {
                left: true,
                right: false,
                both: false
            }
        );

        let mut det = blink_detector(PairedPolicy::Prioritized);
        assert!(run(&mut det, &[SignalFrame::new()]).is_empty());
    }

    #[test]
    fn test_independent_reports_every_side() {
        let mut det = blink_detector(PairedPolicy::Independent);
        let events = run(&mut det, &[eyes(0.9, 0.9)]);
        assert_eq!(
            events,
            vec![
                TriggerEvent::changed(Trigger::BlinkRight, true),
                TriggerEvent::pulse(Trigger::BlinkRight),
                TriggerEvent::changed(Trigger::BlinkLeft, true),
                TriggerEvent::pulse(Trigger::BlinkLeft),
                TriggerEvent::changed(Trigger::Blink, true),
                TriggerEvent::pulse(Trigger::Blink),
            ]
        );
    }

    #[test]
    fn test_independent_keeps_state_for_absent_side() {
        let mut det = blink_detector(PairedPolicy::Independent);
        let mut rec = EventRecorder::new();
        det.evaluate(&eyes(0.9, 0.9), &mut rec);
        rec.clear();

        let only_left = SignalFrame::new().with(ExpressionKey::EyeBlinkRight, 0.1);
        det.evaluate(&only_left, &mut rec);
        assert_eq!(
            rec.events(),
            &[TriggerEvent::changed(Trigger::BlinkLeft, false)]
        );
        // Compound is not re-evaluated without both sides.
        assert!(det.state().both);
        assert!(det.state().right);
    }
}
