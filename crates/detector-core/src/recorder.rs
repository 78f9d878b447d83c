//! A sink that keeps every notification in delivery order.

use facetrigger_signal_model::TriggerEvent;

use crate::sink::EventSink;

/// Collects events for later inspection or forwarding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecorder {
    events: Vec<TriggerEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    /// Take all recorded events, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<TriggerEvent> {
        self.events
    }
}

impl EventSink for EventRecorder {
    fn handle(&mut self, event: TriggerEvent) {
        self.events.push(event);
    }
}
