//! Host event model.
//!
//! The host emits four named lifecycle/metric events. Instead of routing
//! on raw event-name strings, each event is represented as a variant of
//! [`HostEvent`] carrying its JSON payload, and handlers dispatch on
//! [`EventKind`].

use std::fmt;

use serde_json::Value;

/// Value of the `source` message attribute attached to every outbound event.
pub const EVENT_SOURCE: &str = "artillery";

/// The four host event kinds recognized by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PhaseStarted,
    PhaseCompleted,
    Stats,
    Done,
}

impl EventKind {
    /// All recognized kinds, in the order handlers are bound.
    pub const ALL: [EventKind; 4] = [
        EventKind::PhaseStarted,
        EventKind::PhaseCompleted,
        EventKind::Stats,
        EventKind::Done,
    ];

    /// The host-side event name, also used as the outbound `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PhaseStarted => "phaseStarted",
            EventKind::PhaseCompleted => "phaseCompleted",
            EventKind::Stats => "stats",
            EventKind::Done => "done",
        }
    }

    /// Whether this is the terminal event whose publish is captured for
    /// draining instead of being awaited inline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Done)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host event together with its payload.
///
/// Payloads are arbitrary JSON; the emitter forwards them verbatim and
/// enforces no schema.
#[derive(Debug, Clone)]
pub enum HostEvent {
    PhaseStarted(Value),
    PhaseCompleted(Value),
    Stats(Value),
    Done(Value),
}

impl HostEvent {
    /// Build an event of the given kind around a payload.
    pub fn new(kind: EventKind, payload: Value) -> Self {
        match kind {
            EventKind::PhaseStarted => HostEvent::PhaseStarted(payload),
            EventKind::PhaseCompleted => HostEvent::PhaseCompleted(payload),
            EventKind::Stats => HostEvent::Stats(payload),
            EventKind::Done => HostEvent::Done(payload),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::PhaseStarted(_) => EventKind::PhaseStarted,
            HostEvent::PhaseCompleted(_) => EventKind::PhaseCompleted,
            HostEvent::Stats(_) => EventKind::Stats,
            HostEvent::Done(_) => EventKind::Done,
        }
    }

    pub fn payload(&self) -> &Value {
        match self {
            HostEvent::PhaseStarted(payload)
            | HostEvent::PhaseCompleted(payload)
            | HostEvent::Stats(payload)
            | HostEvent::Done(payload) => payload,
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            HostEvent::PhaseStarted(payload)
            | HostEvent::PhaseCompleted(payload)
            | HostEvent::Stats(payload)
            | HostEvent::Done(payload) => payload,
        }
    }
}
