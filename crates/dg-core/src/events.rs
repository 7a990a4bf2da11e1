//! Observable construction trace.
//!
//! The generator can record every graph mutation as it happens. An external
//! visualizer replays the log to show the layout being built step by step,
//! instead of the generator pacing itself.

use core::fmt;

use crate::graph::{ConnectionType, NodeType, Pos};

/// One step in the construction of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    AttemptStarted { attempt: usize },
    NodeAdded { pos: Pos, kind: NodeType },
    ConnectionAdded { from: Pos, to: Pos, kind: ConnectionType },
    NodeRetyped { pos: Pos, kind: NodeType },
    ConnectionsRetyped { pos: Pos, kind: ConnectionType },
    NodeRemoved { pos: Pos },
    QuadFused { anchor: Pos },
    AttemptFailed { attempt: usize, reason: String },
    Completed { attempt: usize, rooms: usize },
}

impl fmt::Display for GraphEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphEvent::AttemptStarted { attempt } => write!(f, "attempt {attempt} started"),
            GraphEvent::NodeAdded { pos, kind } => write!(f, "{kind} room added at {pos}"),
            GraphEvent::ConnectionAdded { from, to, kind } => {
                write!(f, "{kind} door added between {from} and {to}")
            }
            GraphEvent::NodeRetyped { pos, kind } => write!(f, "room at {pos} became {kind}"),
            GraphEvent::ConnectionsRetyped { pos, kind } => {
                write!(f, "doors at {pos} became {kind}")
            }
            GraphEvent::NodeRemoved { pos } => write!(f, "room at {pos} removed"),
            GraphEvent::QuadFused { anchor } => write!(f, "2x2 block fused at {anchor}"),
            GraphEvent::AttemptFailed { attempt, reason } => {
                write!(f, "attempt {attempt} failed: {reason}")
            }
            GraphEvent::Completed { attempt, rooms } => {
                write!(f, "completed on attempt {attempt} with {rooms} rooms")
            }
        }
    }
}

/// Event sink owned by the generator.
///
/// Disabled by default; recording costs nothing until enabled.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    enabled: bool,
    events: Vec<GraphEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording, discarding any previous trace.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.events.clear();
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn push(&mut self, event: GraphEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Take the recorded trace, leaving the log empty.
    pub fn take(&mut self) -> Vec<GraphEvent> {
        core::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_log_records_nothing() {
        let mut log = EventLog::new();
        log.push(GraphEvent::AttemptStarted { attempt: 1 });
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_enable_clears_and_records() {
        let mut log = EventLog::new();
        log.enable();
        log.push(GraphEvent::NodeAdded {
            pos: Pos::new(0, 0),
            kind: NodeType::Start,
        });
        assert_eq!(log.events().len(), 1);

        log.enable();
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_take_drains_the_log() {
        let mut log = EventLog::new();
        log.enable();
        log.push(GraphEvent::NodeRemoved { pos: Pos::new(1, 1) });
        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_event_display() {
        let event = GraphEvent::NodeAdded {
            pos: Pos::new(2, -1),
            kind: NodeType::Key,
        };
        assert_eq!(event.to_string(), "Key room added at (2, -1)");
    }
}
