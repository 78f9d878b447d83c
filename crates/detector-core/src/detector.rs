//! The detector variants and the standard expression catalogue.

use facetrigger_common::{DetectionConfig, PairedPolicy};
use facetrigger_signal_model::{ExpressionKey, SignalFrame, Trigger};

use crate::level::{LevelDetector, LevelSource};
use crate::paired::{PairedDetector, PairedTriggers};
use crate::sink::EventSink;

/// A configured detector with its own private state.
#[derive(Debug, Clone)]
pub enum Detector {
    Level(LevelDetector),
    Paired(PairedDetector),
}

impl Detector {
    /// Feed one frame, reporting any edges to `sink`.
    pub fn evaluate(&mut self, frame: &SignalFrame, sink: &mut dyn EventSink) {
        match self {
            Self::Level(det) => det.evaluate(frame, sink),
            Self::Paired(det) => det.evaluate(frame, sink),
        }
    }

    pub fn threshold(&self) -> f32 {
        match self {
            Self::Level(det) => det.threshold(),
            Self::Paired(det) => det.threshold(),
        }
    }

    /// The trigger that names this detector (the compound one for pairs).
    pub fn primary_trigger(&self) -> Trigger {
        match self {
            Self::Level(det) => det.trigger(),
            Self::Paired(det) => det.triggers().both,
        }
    }

    /// Every trigger this detector can report.
    pub fn triggers(&self) -> Vec<Trigger> {
        match self {
            Self::Level(det) => vec![det.trigger()],
            Self::Paired(det) => {
                let t = det.triggers();
                vec![t.both, t.left, t.right]
            }
        }
    }

    /// Tracker keys this detector reads.
    pub fn keys(&self) -> Vec<ExpressionKey> {
        match self {
            Self::Level(det) => det.source().keys(),
            Self::Paired(det) => {
                let (left, right) = det.tracker_keys();
                vec![left, right]
            }
        }
    }

    /// Mean of both mouth corners.
    pub fn smile(threshold: f32) -> Self {
        Self::Level(LevelDetector::new(
            Trigger::Smile,
            LevelSource::Average(ExpressionKey::MouthSmileLeft, ExpressionKey::MouthSmileRight),
            threshold,
        ))
    }

    pub fn blink(threshold: f32, policy: PairedPolicy) -> Self {
        Self::Paired(
            PairedDetector::new(
                threshold,
                ExpressionKey::EyeBlinkLeft,
                ExpressionKey::EyeBlinkRight,
                PairedTriggers {
                    both: Trigger::Blink,
                    left: Trigger::BlinkLeft,
                    right: Trigger::BlinkRight,
                },
            )
            .with_policy(policy),
        )
    }

    pub fn brow_down(threshold: f32, policy: PairedPolicy) -> Self {
        Self::Paired(
            PairedDetector::new(
                threshold,
                ExpressionKey::BrowDownLeft,
                ExpressionKey::BrowDownRight,
                PairedTriggers {
                    both: Trigger::BrowDown,
                    left: Trigger::BrowDownLeft,
                    right: Trigger::BrowDownRight,
                },
            )
            .with_policy(policy),
        )
    }

    /// Inner brow raise.
    pub fn brow_up(threshold: f32) -> Self {
        Self::single(Trigger::BrowUp, ExpressionKey::BrowInnerUp, threshold)
    }

    pub fn mouth_pucker(threshold: f32) -> Self {
        Self::single(Trigger::MouthPucker, ExpressionKey::MouthPucker, threshold)
    }

    pub fn jaw_open(threshold: f32) -> Self {
        Self::single(Trigger::JawOpen, ExpressionKey::JawOpen, threshold)
    }

    pub fn squint(threshold: f32, policy: PairedPolicy) -> Self {
        Self::Paired(
            PairedDetector::new(
                threshold,
                ExpressionKey::EyeSquintLeft,
                ExpressionKey::EyeSquintRight,
                PairedTriggers {
                    both: Trigger::Squint,
                    left: Trigger::SquintLeft,
                    right: Trigger::SquintRight,
                },
            )
            .with_policy(policy),
        )
    }

    pub fn cheek_puff(threshold: f32) -> Self {
        Self::single(Trigger::CheekPuff, ExpressionKey::CheekPuff, threshold)
    }

    /// User's jaw-left; mirrored, so it reads the tracker's `jawRight`.
    pub fn jaw_left(threshold: f32) -> Self {
        Self::single(Trigger::JawLeft, ExpressionKey::JawRight, threshold)
    }

    /// User's jaw-right; mirrored, so it reads the tracker's `jawLeft`.
    pub fn jaw_right(threshold: f32) -> Self {
        Self::single(Trigger::JawRight, ExpressionKey::JawLeft, threshold)
    }

    fn single(trigger: Trigger, key: ExpressionKey, threshold: f32) -> Self {
        Self::Level(LevelDetector::new(trigger, LevelSource::Single(key), threshold))
    }
}

/// Build the full detector set in dispatch order.
pub fn standard_detectors(config: &DetectionConfig) -> Vec<Detector> {
    let t = &config.thresholds;
    let policy = config.paired_policy;
    vec![
        Detector::smile(t.smile),
        Detector::blink(t.blink, policy),
        Detector::brow_down(t.brow_down, policy),
        Detector::brow_up(t.brow_up),
        Detector::mouth_pucker(t.mouth_pucker),
        Detector::jaw_open(t.jaw_open),
        Detector::squint(t.squint, policy),
        Detector::cheek_puff(t.cheek_puff),
        Detector::jaw_left(t.jaw_left),
        Detector::jaw_right(t.jaw_right),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::EventRecorder;
    use facetrigger_common::Thresholds;
    use facetrigger_signal_model::TriggerEvent;

    #[test]
    fn test_standard_set_order_and_thresholds() {
        let detectors = standard_detectors(&DetectionConfig::default());
        let primaries: Vec<_> = detectors.iter().map(Detector::primary_trigger).collect();
        assert_eq!(
            primaries,
            vec![
                Trigger::Smile,
                Trigger::Blink,
                Trigger::BrowDown,
                Trigger::BrowUp,
                Trigger::MouthPucker,
                Trigger::JawOpen,
                Trigger::Squint,
                Trigger::CheekPuff,
                Trigger::JawLeft,
                Trigger::JawRight,
            ]
        );

        let thresholds = Thresholds::default();
        assert_eq!(detectors[0].threshold(), thresholds.smile);
        assert_eq!(detectors[2].threshold(), thresholds.brow_down);
        assert_eq!(detectors[3].threshold(), thresholds.brow_up);
    }

    #[test]
    fn test_every_trigger_has_exactly_one_detector() {
        let detectors = standard_detectors(&DetectionConfig::default());
        let mut all: Vec<_> = detectors.iter().flat_map(Detector::triggers).collect();
        all.sort();
        assert_eq!(all, Trigger::ALL.to_vec());
    }

    #[test]
    fn test_jaw_sides_are_mirrored() {
        let mut det = Detector::jaw_left(0.5);
        let mut rec = EventRecorder::new();
        det.evaluate(
            &SignalFrame::new().with(ExpressionKey::JawLeft, 0.9),
            &mut rec,
        );
        assert!(rec.is_empty());

        det.evaluate(
            &SignalFrame::new().with(ExpressionKey::JawRight, 0.9),
            &mut rec,
        );
        assert_eq!(rec.events()[0], TriggerEvent::changed(Trigger::JawLeft, true));
    }

    #[test]
    fn test_keys_reported_in_tracker_labels() {
        assert_eq!(
            Detector::smile(0.7).keys(),
            vec![ExpressionKey::MouthSmileLeft, ExpressionKey::MouthSmileRight]
        );
        assert_eq!(
            Detector::squint(0.8, PairedPolicy::Prioritized).keys(),
            vec![ExpressionKey::EyeSquintLeft, ExpressionKey::EyeSquintRight]
        );
    }
}
