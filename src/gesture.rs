//! Touch-swipe recognition for gallery navigation.
//!
//! `Idle → Tracking → {Committed | Reverted} → Idle`. Only mobile
//! sessions with an active gallery construct a tracker; desktop input
//! never reaches it.

use crate::events::Direction;

/// Fraction of the content width a swipe must travel to commit.
const EDGE_FRACTION: f64 = 0.25;

/// How the gesture resolved. `Commit` slides the content fully off-screen
/// in the indicated direction; `Revert` returns it to center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Commit(Direction),
    Revert,
}

/// Tracks one touch interaction from start to end.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    start_x: f64,
    delta: f64,
    /// Offset clamp bounds derived from the gallery position: at the first
    /// item rightward reveal is forbidden (`max = 0`), at the last item
    /// leftward reveal is forbidden (`min = 0`).
    min: f64,
    max: f64,
    edge_threshold: f64,
    /// Cleared the moment clamping kicks in; a clamped gesture never
    /// commits regardless of travel.
    can_commit: bool,
    moved: bool,
}

impl GestureTracker {
    pub fn start(x: f64, content_width: f64, index: usize, total: usize) -> Self {
        let max = if index == 0 { 0.0 } else { f64::INFINITY };
        let min = if index == total { 0.0 } else { f64::NEG_INFINITY };
        Self {
            start_x: x,
            delta: 0.0,
            min,
            max,
            edge_threshold: content_width * EDGE_FRACTION,
            can_commit: true,
            moved: false,
        }
    }

    /// Records a move and returns the clamped visual offset to apply.
    pub fn track(&mut self, x: f64) -> f64 {
        self.delta = self.start_x - x;
        self.moved = true;

        let mut offset = -self.delta;
        if offset < self.min {
            offset = self.min;
            self.can_commit = false;
        }
        if offset > self.max {
            offset = self.max;
            self.can_commit = false;
        }
        offset
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }

    /// True once at least one move was tracked; a touch that never moved
    /// needs no settle animation.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Resolves the gesture. Commits when the travel cleared the edge
    /// threshold and no clamp was hit; the delta sign picks the direction
    /// (dragging rightward reveals the previous item).
    pub fn finish(&self) -> GestureOutcome {
        if self.can_commit && self.delta.abs() > self.edge_threshold {
            if self.delta <= 0.0 {
                GestureOutcome::Commit(Direction::Previous)
            } else {
                GestureOutcome::Commit(Direction::Next)
            }
        } else {
            GestureOutcome::Revert
        }
    }
}
