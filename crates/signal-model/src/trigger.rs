//! Application-level trigger events.
//!
//! Every logical signal a detector can report has a [`Trigger`]. Each
//! trigger produces two kinds of notification: a state change carrying the
//! new boolean, and a payload-free pulse fired only when the signal turns on.
//! Sides are named from the user's perspective.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical signal reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Smile,
    Blink,
    BlinkLeft,
    BlinkRight,
    BrowDown,
    BrowDownLeft,
    BrowDownRight,
    BrowUp,
    MouthPucker,
    JawOpen,
    Squint,
    SquintLeft,
    SquintRight,
    CheekPuff,
    JawLeft,
    JawRight,
}

impl Trigger {
    pub const ALL: [Trigger; 16] = [
        Self::Smile,
        Self::Blink,
        Self::BlinkLeft,
        Self::BlinkRight,
        Self::BrowDown,
        Self::BrowDownLeft,
        Self::BrowDownRight,
        Self::BrowUp,
        Self::MouthPucker,
        Self::JawOpen,
        Self::Squint,
        Self::SquintLeft,
        Self::SquintRight,
        Self::CheekPuff,
        Self::JawLeft,
        Self::JawRight,
    ];

    /// Short human label, also used when a pulse is displayed.
    pub fn label(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Blink => "blink",
            Self::BlinkLeft => "blink left",
            Self::BlinkRight => "blink right",
            Self::BrowDown => "brow down",
            Self::BrowDownLeft => "brow down left",
            Self::BrowDownRight => "brow down right",
            Self::BrowUp => "brow up",
            Self::MouthPucker => "mouth pucker",
            Self::JawOpen => "jaw open",
            Self::Squint => "squint",
            Self::SquintLeft => "squint left",
            Self::SquintRight => "squint right",
            Self::CheekPuff => "cheek puff",
            Self::JawLeft => "jaw left",
            Self::JawRight => "jaw right",
        }
    }

    /// Name of the host's state-change handler for this trigger.
    pub fn change_handler_name(self) -> &'static str {
        match self {
            Self::Smile => "onSmileDidChange",
            Self::Blink => "onBlinkDidChange",
            Self::BlinkLeft => "onBlinkLeftDidChange",
            Self::BlinkRight => "onBlinkRightDidChange",
            Self::BrowDown => "onBrowDownDidChange",
            Self::BrowDownLeft => "onBrowDownLeftDidChange",
            Self::BrowDownRight => "onBrowDownRightDidChange",
            Self::BrowUp => "onBrowUpDidChange",
            Self::MouthPucker => "onMouthPuckerDidChange",
            Self::JawOpen => "onJawOpenDidChange",
            Self::Squint => "onSquintDidChange",
            Self::SquintLeft => "onSquintLeftDidChange",
            Self::SquintRight => "onSquintRightDidChange",
            Self::CheekPuff => "onCheekPuffDidChange",
            Self::JawLeft => "onJawLeftDidChange",
            Self::JawRight => "onJawRightDidChange",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What happened to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerKind {
    /// The trigger's boolean flipped to `active`.
    Changed { active: bool },
    /// The trigger just turned on. Always follows `Changed { active: true }`.
    Pulse,
}

/// A single notification delivered to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub trigger: Trigger,

    #[serde(flatten)]
    pub kind: TriggerKind,
}

impl TriggerEvent {
    pub fn changed(trigger: Trigger, active: bool) -> Self {
        Self {
            trigger,
            kind: TriggerKind::Changed { active },
        }
    }

    pub fn pulse(trigger: Trigger) -> Self {
        Self {
            trigger,
            kind: TriggerKind::Pulse,
        }
    }

    /// The events emitted for one edge: the state change, then a pulse when
    /// the trigger turned on.
    pub fn edge(trigger: Trigger, active: bool) -> impl Iterator<Item = TriggerEvent> {
        std::iter::once(Self::changed(trigger, active))
            .chain(active.then(|| Self::pulse(trigger)))
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TriggerKind::Changed { active } => {
                write!(f, "{} {}", self.trigger.change_handler_name(), active)
            }
            TriggerKind::Pulse => f.write_str(self.trigger.label()),
        }
    }
}
