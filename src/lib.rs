//! artillery-broker-emitter
//!
//! Forwards Artillery load-test lifecycle and stats events to an external
//! message broker (currently AWS SNS), tagging each event with `type` and
//! `source` message attributes.
//!
//! ```text
//! [host events] -> [BrokerEmitter handlers] -> [Dispatcher] -> [SNS publish]
//!                         |
//!                  'done' publish -> [DrainSlot] -> drain() / cleanup()
//! ```
//!
//! Non-terminal events (`phaseStarted`, `phaseCompleted`, `stats`) await
//! their own publish before the handler returns. The terminal `done`
//! publish is captured in a single drain slot so the host can sequence
//! shutdown after the last publish completes.

pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod drain;
pub mod emitter;
pub mod error;
pub mod events;
pub mod logging;
pub mod publisher;
pub mod source;

pub use config::{Broker, EmitterConfig, LogLevel, SnsSettings, Vendor};
pub use credentials::AwsCredentials;
pub use dispatcher::Dispatcher;
pub use drain::DrainSlot;
pub use emitter::BrokerEmitter;
pub use error::{EmitterError, Result};
pub use events::{EventKind, HostEvent, EVENT_SOURCE};
pub use publisher::{
    EventAttributes, MockPublisher, OutboundMessage, Publisher, SnsPublisher,
};
pub use source::{EventCallback, EventSource, LocalEventSource};
