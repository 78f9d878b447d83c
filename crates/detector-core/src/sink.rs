//! Host-facing notification interface.
//!
//! A host implements [`EventSink`] and overrides only the handlers it cares
//! about; every handler defaults to a no-op. Hosts that prefer a single
//! entry point override [`EventSink::handle`] instead, which otherwise
//! routes each event to its named handler.

use facetrigger_signal_model::{Trigger, TriggerEvent, TriggerKind};

/// Receiver for trigger notifications.
///
/// Handlers run synchronously on the thread that called
/// [`Engine::process`](crate::Engine::process), before it returns.
#[allow(unused_variables)]
pub trait EventSink {
    /// Entry point used by detectors. Routes to the named handler below.
    fn handle(&mut self, event: TriggerEvent) {
        route(self, event);
    }

    fn on_smile(&mut self) {}
    fn on_smile_did_change(&mut self, smiling: bool) {}

    fn on_blink(&mut self) {}
    fn on_blink_did_change(&mut self, blinking: bool) {}

    fn on_blink_left(&mut self) {}
    fn on_blink_left_did_change(&mut self, blinking_left: bool) {}

    fn on_blink_right(&mut self) {}
    fn on_blink_right_did_change(&mut self, blinking_right: bool) {}

    fn on_brow_down(&mut self) {}
    fn on_brow_down_did_change(&mut self, brow_down: bool) {}

    fn on_brow_down_left(&mut self) {}
    fn on_brow_down_left_did_change(&mut self, brow_down_left: bool) {}

    fn on_brow_down_right(&mut self) {}
    fn on_brow_down_right_did_change(&mut self, brow_down_right: bool) {}

    fn on_brow_up(&mut self) {}
    fn on_brow_up_did_change(&mut self, brow_up: bool) {}

    fn on_mouth_pucker(&mut self) {}
    fn on_mouth_pucker_did_change(&mut self, mouth_puckering: bool) {}

    fn on_jaw_open(&mut self) {}
    fn on_jaw_open_did_change(&mut self, jaw_opening: bool) {}

    fn on_squint(&mut self) {}
    fn on_squint_did_change(&mut self, squinting: bool) {}

    fn on_squint_left(&mut self) {}
    fn on_squint_left_did_change(&mut self, squinting_left: bool) {}

    fn on_squint_right(&mut self) {}
    fn on_squint_right_did_change(&mut self, squinting_right: bool) {}

    fn on_cheek_puff(&mut self) {}
    fn on_cheek_puff_did_change(&mut self, cheek_puffing: bool) {}

    fn on_jaw_left(&mut self) {}
    fn on_jaw_left_did_change(&mut self, jaw_left: bool) {}

    fn on_jaw_right(&mut self) {}
    fn on_jaw_right_did_change(&mut self, jaw_right: bool) {}
}

/// Deliver `event` to the matching named handler of `sink`.
pub fn route<S: EventSink + ?Sized>(sink: &mut S, event: TriggerEvent) {
    match event.kind {
        TriggerKind::Changed { active } => match event.trigger {
            Trigger::Smile => sink.on_smile_did_change(active),
            Trigger::Blink => sink.on_blink_did_change(active),
            Trigger::BlinkLeft => sink.on_blink_left_did_change(active),
            Trigger::BlinkRight => sink.on_blink_right_did_change(active),
            Trigger::BrowDown => sink.on_brow_down_did_change(active),
            Trigger::BrowDownLeft => sink.on_brow_down_left_did_change(active),
            Trigger::BrowDownRight => sink.on_brow_down_right_did_change(active),
            Trigger::BrowUp => sink.on_brow_up_did_change(active),
            Trigger::MouthPucker => sink.on_mouth_pucker_did_change(active),
            Trigger::JawOpen => sink.on_jaw_open_did_change(active),
            Trigger::Squint => sink.on_squint_did_change(active),
            Trigger::SquintLeft => sink.on_squint_left_did_change(active),
            Trigger::SquintRight => sink.on_squint_right_did_change(active),
            Trigger::CheekPuff => sink.on_cheek_puff_did_change(active),
            Trigger::JawLeft => sink.on_jaw_left_did_change(active),
            Trigger::JawRight => sink.on_jaw_right_did_change(active),
        },
        TriggerKind::Pulse => match event.trigger {
            Trigger::Smile => sink.on_smile(),
            Trigger::Blink => sink.on_blink(),
            Trigger::BlinkLeft => sink.on_blink_left(),
            Trigger::BlinkRight => sink.on_blink_right(),
            Trigger::BrowDown => sink.on_brow_down(),
            Trigger::BrowDownLeft => sink.on_brow_down_left(),
            Trigger::BrowDownRight => sink.on_brow_down_right(),
            Trigger::BrowUp => sink.on_brow_up(),
            Trigger::MouthPucker => sink.on_mouth_pucker(),
            Trigger::JawOpen => sink.on_jaw_open(),
            Trigger::Squint => sink.on_squint(),
            Trigger::SquintLeft => sink.on_squint_left(),
            Trigger::SquintRight => sink.on_squint_right(),
            Trigger::CheekPuff => sink.on_cheek_puff(),
            Trigger::JawLeft => sink.on_jaw_left(),
            Trigger::JawRight => sink.on_jaw_right(),
        },
    }
}

/// Report one edge of `trigger`: the state change, then a pulse if it
/// turned on.
pub(crate) fn emit_edge(sink: &mut dyn EventSink, trigger: Trigger, active: bool) {
    tracing::trace!(trigger = %trigger, active, "trigger edge");
    for event in TriggerEvent::edge(trigger, active) {
        sink.handle(event);
    }
}

/// Discards every notification.
impl EventSink for () {}

/// Implements [`EventSink`] for a pointer-like wrapper by forwarding the
/// entry point and every named handler to the pointee.
macro_rules! forwarding_sink {
    (@handlers $($pulse:ident / $change:ident),* $(,)?) => {
        $(
            fn $pulse(&mut self) {
                (**self).$pulse();
            }

            fn $change(&mut self, active: bool) {
                (**self).$change(active);
            }
        )*
    };
    ($wrapper:ty) => {
        impl<S: EventSink + ?Sized> EventSink for $wrapper {
            fn handle(&mut self, event: TriggerEvent) {
                (**self).handle(event);
            }

            forwarding_sink!(@handlers
                on_smile / on_smile_did_change,
                on_blink / on_blink_did_change,
                on_blink_left / on_blink_left_did_change,
                on_blink_right / on_blink_right_did_change,
                on_brow_down / on_brow_down_did_change,
                on_brow_down_left / on_brow_down_left_did_change,
                on_brow_down_right / on_brow_down_right_did_change,
                on_brow_up / on_brow_up_did_change,
                on_mouth_pucker / on_mouth_pucker_did_change,
                on_jaw_open / on_jaw_open_did_change,
                on_squint / on_squint_did_change,
                on_squint_left / on_squint_left_did_change,
                on_squint_right / on_squint_right_did_change,
                on_cheek_puff / on_cheek_puff_did_change,
                on_jaw_left / on_jaw_left_did_change,
                on_jaw_right / on_jaw_right_did_change
            );
        }
    };
}

forwarding_sink!(&mut S);
forwarding_sink!(Box<S>);
