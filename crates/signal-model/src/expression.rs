//! Blend-shape keys reported by the face-tracking subsystem.
//!
//! Key names follow the tracker's own labels, which are mirrored relative
//! to the user: `EyeBlinkLeft` is the eye on the image's left, i.e. the
//! user's right eye. Detectors that report user-facing sides swap them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use facetrigger_common::FaceTriggerError;

/// One facial-motion coefficient in the tracker's fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionKey {
    BrowDownLeft,
    BrowDownRight,
    BrowInnerUp,
    BrowOuterUpLeft,
    BrowOuterUpRight,
    CheekPuff,
    CheekSquintLeft,
    CheekSquintRight,
    EyeBlinkLeft,
    EyeBlinkRight,
    EyeLookDownLeft,
    EyeLookDownRight,
    EyeLookInLeft,
    EyeLookInRight,
    EyeLookOutLeft,
    EyeLookOutRight,
    EyeLookUpLeft,
    EyeLookUpRight,
    EyeSquintLeft,
    EyeSquintRight,
    EyeWideLeft,
    EyeWideRight,
    JawForward,
    JawLeft,
    JawOpen,
    JawRight,
    MouthClose,
    MouthDimpleLeft,
    MouthDimpleRight,
    MouthFrownLeft,
    MouthFrownRight,
    MouthFunnel,
    MouthLeft,
    MouthLowerDownLeft,
    MouthLowerDownRight,
    MouthPressLeft,
    MouthPressRight,
    MouthPucker,
    MouthRight,
    MouthRollLower,
    MouthRollUpper,
    MouthShrugLower,
    MouthShrugUpper,
    MouthSmileLeft,
    MouthSmileRight,
    MouthStretchLeft,
    MouthStretchRight,
    MouthUpperUpLeft,
    MouthUpperUpRight,
    NoseSneerLeft,
    NoseSneerRight,
    TongueOut,
}

impl ExpressionKey {
    /// Number of keys in the tracker's set.
    pub const COUNT: usize = 52;

    /// Every key, in declaration order (`ALL[k.index()] == k`).
    pub const ALL: [ExpressionKey; Self::COUNT] = [
        Self::BrowDownLeft,
        Self::BrowDownRight,
        Self::BrowInnerUp,
        Self::BrowOuterUpLeft,
        Self::BrowOuterUpRight,
        Self::CheekPuff,
        Self::CheekSquintLeft,
        Self::CheekSquintRight,
        Self::EyeBlinkLeft,
        Self::EyeBlinkRight,
        Self::EyeLookDownLeft,
        Self::EyeLookDownRight,
        Self::EyeLookInLeft,
        Self::EyeLookInRight,
        Self::EyeLookOutLeft,
        Self::EyeLookOutRight,
        Self::EyeLookUpLeft,
        Self::EyeLookUpRight,
        Self::EyeSquintLeft,
        Self::EyeSquintRight,
        Self::EyeWideLeft,
        Self::EyeWideRight,
        Self::JawForward,
        Self::JawLeft,
        Self::JawOpen,
        Self::JawRight,
        Self::MouthClose,
        Self::MouthDimpleLeft,
        Self::MouthDimpleRight,
        Self::MouthFrownLeft,
        Self::MouthFrownRight,
        Self::MouthFunnel,
        Self::MouthLeft,
        Self::MouthLowerDownLeft,
        Self::MouthLowerDownRight,
        Self::MouthPressLeft,
        Self::MouthPressRight,
        Self::MouthPucker,
        Self::MouthRight,
        Self::MouthRollLower,
        Self::MouthRollUpper,
        Self::MouthShrugLower,
        Self::MouthShrugUpper,
        Self::MouthSmileLeft,
        Self::MouthSmileRight,
        Self::MouthStretchLeft,
        Self::MouthStretchRight,
        Self::MouthUpperUpLeft,
        Self::MouthUpperUpRight,
        Self::NoseSneerLeft,
        Self::NoseSneerRight,
        Self::TongueOut,
    ];

    /// Dense index into `ALL`, used for table lookups.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The tracker's name for this key (camelCase).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrowDownLeft => "browDownLeft",
            Self::BrowDownRight => "browDownRight",
            Self::BrowInnerUp => "browInnerUp",
            Self::BrowOuterUpLeft => "browOuterUpLeft",
            Self::BrowOuterUpRight => "browOuterUpRight",
            Self::CheekPuff => "cheekPuff",
            Self::CheekSquintLeft => "cheekSquintLeft",
            Self::CheekSquintRight => "cheekSquintRight",
            Self::EyeBlinkLeft => "eyeBlinkLeft",
            Self::EyeBlinkRight => "eyeBlinkRight",
            Self::EyeLookDownLeft => "eyeLookDownLeft",
            Self::EyeLookDownRight => "eyeLookDownRight",
            Self::EyeLookInLeft => "eyeLookInLeft",
            Self::EyeLookInRight => "eyeLookInRight",
            Self::EyeLookOutLeft => "eyeLookOutLeft",
            Self::EyeLookOutRight => "eyeLookOutRight",
            Self::EyeLookUpLeft => "eyeLookUpLeft",
            Self::EyeLookUpRight => "eyeLookUpRight",
            Self::EyeSquintLeft => "eyeSquintLeft",
            Self::EyeSquintRight => "eyeSquintRight",
            Self::EyeWideLeft => "eyeWideLeft",
            Self::EyeWideRight => "eyeWideRight",
            Self::JawForward => "jawForward",
            Self::JawLeft => "jawLeft",
            Self::JawOpen => "jawOpen",
            Self::JawRight => "jawRight",
            Self::MouthClose => "mouthClose",
            Self::MouthDimpleLeft => "mouthDimpleLeft",
            Self::MouthDimpleRight => "mouthDimpleRight",
            Self::MouthFrownLeft => "mouthFrownLeft",
            Self::MouthFrownRight => "mouthFrownRight",
            Self::MouthFunnel => "mouthFunnel",
            Self::MouthLeft => "mouthLeft",
            Self::MouthLowerDownLeft => "mouthLowerDownLeft",
            Self::MouthLowerDownRight => "mouthLowerDownRight",
            Self::MouthPressLeft => "mouthPressLeft",
            Self::MouthPressRight => "mouthPressRight",
            Self::MouthPucker => "mouthPucker",
            Self::MouthRight => "mouthRight",
            Self::MouthRollLower => "mouthRollLower",
            Self::MouthRollUpper => "mouthRollUpper",
            Self::MouthShrugLower => "mouthShrugLower",
            Self::MouthShrugUpper => "mouthShrugUpper",
            Self::MouthSmileLeft => "mouthSmileLeft",
            Self::MouthSmileRight => "mouthSmileRight",
            Self::MouthStretchLeft => "mouthStretchLeft",
            Self::MouthStretchRight => "mouthStretchRight",
            Self::MouthUpperUpLeft => "mouthUpperUpLeft",
            Self::MouthUpperUpRight => "mouthUpperUpRight",
            Self::NoseSneerLeft => "noseSneerLeft",
            Self::NoseSneerRight => "noseSneerRight",
            Self::TongueOut => "tongueOut",
        }
    }

    /// Look up a key by its tracker name. Returns `None` for names outside
    /// the known set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ExpressionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpressionKey {
    type Err = FaceTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim())
            .ok_or_else(|| FaceTriggerError::unknown_key(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_indexed_by_discriminant() {
        for (i, key) in ExpressionKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for key in ExpressionKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "eyeBlinkRight".parse::<ExpressionKey>().unwrap(),
            ExpressionKey::EyeBlinkRight
        );
        match "eyeBlinkMiddle".parse::<ExpressionKey>() {
            Err(FaceTriggerError::UnknownKey { name }) => assert_eq!(name, "eyeBlinkMiddle"),
            other => panic!("expected unknown key, got {other:?}"),
        }
        assert_eq!(ExpressionKey::from_name("EyeBlinkRight"), None);
    }
}
