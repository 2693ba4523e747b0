//! Polygon drawing session state.
//!
//! Each region moves through `Empty -> Drawing (>= 1 point) -> Completed`.
//! The session owns the in-progress point list and the ordered set of
//! completed polygons. In [`SessionMode::Multi`] closing a region starts a
//! fresh one; in [`SessionMode::Single`] the session locks after the first
//! completion and further input is rejected.

use crate::types::{Point, Polygon};

/// Whether the session accepts one region or arbitrarily many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// One completed polygon total; the session locks afterwards.
    Single,
    /// Any number of completed polygons, drawn one after another.
    #[default]
    Multi,
}

/// Reasons a session operation was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// A region needs at least three points before it can be closed.
    #[error("a region needs at least 3 points, got {have}")]
    TooFewPoints {
        /// Points currently in the in-progress region.
        have: usize,
    },

    /// A single-region session already has its completed polygon.
    #[error("region already completed")]
    Locked,
}

/// Mutable state for one region-drawing interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSession {
    mode: SessionMode,
    current: Vec<Point>,
    completed: Vec<Polygon>,
}

impl PolygonSession {
    /// Create an empty session.
    #[must_use]
    pub const fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            current: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Append a point to the in-progress region.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Locked`] when a single-region session has
    /// already completed its polygon; the point is discarded and state is
    /// unchanged.
    pub fn add_point(&mut self, point: Point) -> Result<(), SessionError> {
        if self.is_locked() {
            return Err(SessionError::Locked);
        }
        self.current.push(point);
        Ok(())
    }

    /// Remove the most recently added point.
    ///
    /// Returns the removed point, or `None` when the in-progress region is
    /// already empty (a no-op).
    pub fn undo_last_point(&mut self) -> Option<Point> {
        self.current.pop()
    }

    /// Close the in-progress region and move it into the completed set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TooFewPoints`] when fewer than three points
    /// have been placed, and [`SessionError::Locked`] on a locked
    /// single-region session. State is unchanged in both cases.
    pub fn complete(&mut self) -> Result<(), SessionError> {
        if self.is_locked() {
            return Err(SessionError::Locked);
        }
        if self.current.len() < 3 {
            return Err(SessionError::TooFewPoints {
                have: self.current.len(),
            });
        }
        let points = std::mem::take(&mut self.current);
        self.completed.push(Polygon::new(points));
        Ok(())
    }

    /// Discard the in-progress region and all completed polygons.
    pub fn reset(&mut self) {
        self.current.clear();
        self.completed.clear();
    }

    /// Points of the in-progress region, in placement order.
    #[must_use]
    pub fn current(&self) -> &[Point] {
        &self.current
    }

    /// Completed polygons, in completion order.
    #[must_use]
    pub fn completed(&self) -> &[Polygon] {
        &self.completed
    }

    /// `true` when the session no longer accepts input.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.mode == SessionMode::Single && !self.completed.is_empty()
    }

    /// `true` when the in-progress region can be closed.
    #[must_use]
    pub fn can_complete(&self) -> bool {
        !self.is_locked() && self.current.len() >= 3
    }
}

impl Default for PolygonSession {
    fn default() -> Self {
        Self::new(SessionMode::default())
    }
}
