//! Position-indexed arena of strip segments.
//!
//! Segments sit on a lattice: slot `k` always has its left edge at
//! `origin + k × width`. The arena stores a contiguous run of slots, so the
//! live segments are edge-adjacent by construction. Re-centering moves the
//! origin only; no segment is touched.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

/// Identity of one segment, unique for the life of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SegmentId(u64);

impl SegmentId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment#{}", self.0)
    }
}

#[derive(Debug)]
struct Slot<S> {
    id: SegmentId,
    content: S,
}

/// A live segment with its resolved position.
#[derive(Debug)]
pub struct PlacedSegment<'a, S> {
    pub id: SegmentId,
    /// Lattice index of this segment.
    pub slot: i64,
    /// Left edge in content coordinates.
    pub left_edge: f64,
    /// Right edge in content coordinates; equals the next slot's left edge.
    pub right_edge: f64,
    pub content: &'a S,
}

impl<S> PlacedSegment<'_, S> {
    pub fn width(&self) -> f64 {
        self.right_edge - self.left_edge
    }
}

/// Contiguous run of segments on a fixed-width lattice.
#[derive(Debug)]
pub struct SegmentArena<S> {
    origin: f64,
    width: f64,
    first_slot: i64,
    slots: VecDeque<Slot<S>>,
    next_id: u64,
}

impl<S> SegmentArena<S> {
    /// Create an empty arena for segments of the given width.
    pub fn new(width: f64) -> Self {
        Self {
            origin: 0.0,
            width,
            first_slot: 0,
            slots: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Left edge of any lattice slot.
    pub fn slot_left_edge(&self, slot: i64) -> f64 {
        self.origin + slot as f64 * self.width
    }

    fn last_slot(&self) -> i64 {
        self.first_slot + self.slots.len() as i64 - 1
    }

    /// Left edge of the leftmost live segment.
    pub fn min_x(&self) -> Option<f64> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.slot_left_edge(self.first_slot))
    }

    /// Right edge of the rightmost live segment.
    pub fn max_x(&self) -> Option<f64> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.slot_left_edge(self.last_slot() + 1))
    }

    /// Left edge of the rightmost live segment.
    pub fn last_left_edge(&self) -> Option<f64> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.slot_left_edge(self.last_slot()))
    }

    /// Right edge of the leftmost live segment.
    pub fn first_right_edge(&self) -> Option<f64> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.slot_left_edge(self.first_slot + 1))
    }

    fn allocate_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start a fresh run with a single segment whose left edge is `left_edge`.
    ///
    /// Any live segments are discarded; call [`SegmentArena::clear`] first to
    /// observe them.
    pub fn seed(&mut self, left_edge: f64, content: S) -> SegmentId {
        self.slots.clear();
        self.origin = left_edge;
        self.first_slot = 0;
        let id = self.allocate_id();
        self.slots.push_back(Slot { id, content });
        id
    }

    /// Append a segment adjacent to the right of the run.
    ///
    /// Returns `None` when the arena is empty (use `seed`).
    pub fn push_right(&mut self, content: S) -> Option<SegmentId> {
        if self.slots.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        self.slots.push_back(Slot { id, content });
        Some(id)
    }

    /// Prepend a segment adjacent to the left of the run.
    pub fn push_left(&mut self, content: S) -> Option<SegmentId> {
        if self.slots.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        self.slots.push_front(Slot { id, content });
        self.first_slot -= 1;
        Some(id)
    }

    /// Remove the rightmost segment.
    pub fn pop_right(&mut self) -> Option<(SegmentId, S)> {
        let slot = self.slots.pop_back()?;
        Some((slot.id, slot.content))
    }

    /// Remove the leftmost segment.
    pub fn pop_left(&mut self) -> Option<(SegmentId, S)> {
        let slot = self.slots.pop_front()?;
        self.first_slot += 1;
        Some((slot.id, slot.content))
    }

    /// Remove every segment, leftmost first.
    pub fn clear(&mut self) -> Vec<(SegmentId, S)> {
        self.first_slot = 0;
        self.slots
            .drain(..)
            .map(|slot| (slot.id, slot.content))
            .collect()
    }

    /// Change the lattice width. Only valid on an empty arena.
    pub fn set_width(&mut self, width: f64) {
        debug_assert!(self.slots.is_empty(), "width change on a live arena");
        self.width = width;
    }

    /// Translate every segment by `delta`.
    pub fn shift(&mut self, delta: f64) {
        self.origin += delta;
    }

    /// Replace the content of every segment in place, keeping ids and slots.
    pub fn rebuild_all(&mut self, mut build: impl FnMut() -> S) -> Vec<SegmentId> {
        self.slots
            .iter_mut()
            .map(|slot| {
                slot.content = build();
                slot.id
            })
            .collect()
    }

    /// Live segments, left to right.
    pub fn iter(&self) -> impl Iterator<Item = PlacedSegment<'_, S>> + '_ {
        self.slots.iter().enumerate().map(move |(i, slot)| {
            let index = self.first_slot + i as i64;
            PlacedSegment {
                id: slot.id,
                slot: index,
                left_edge: self.slot_left_edge(index),
                right_edge: self.slot_left_edge(index + 1),
                content: &slot.content,
            }
        })
    }
}
