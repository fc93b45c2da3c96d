//! Segment lifecycle events.
//!
//! The strip records what happened to its segments so a host can mirror
//! the changes into its own view hierarchy (attach, detach, redraw).

use std::collections::VecDeque;

use serde::Serialize;

use super::arena::SegmentId;

/// Maximum undrained events kept; older ones are dropped first.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Something that happened to the strip's segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SegmentEvent {
    /// A segment was built and placed with its left edge at `left_edge`.
    Created { id: SegmentId, left_edge: f64 },
    /// A segment left the viewport and was released.
    Evicted { id: SegmentId },
    /// A segment's content was rebuilt in place.
    Rebuilt { id: SegmentId },
    /// Scroll offset and every segment moved by `delta`.
    Recentered { delta: f64 },
}

/// Bounded backlog of undrained events.
#[derive(Debug, Default)]
pub struct EventLog {
    pending: VecDeque<SegmentEvent>,
    dropped: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SegmentEvent) {
        if self.pending.len() == MAX_PENDING_EVENTS {
            self.pending.pop_front();
            self.dropped += 1;
        }
        self.pending.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<SegmentEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Events discarded because nobody drained them in time.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
