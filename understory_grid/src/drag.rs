// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag tracking: the press position and the deadzone.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_grid::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! // 9px down, but only 3px across.
//! let down = Vec2::new(0.0, 1.0);
//! let across = Vec2::new(1.0, 0.0);
//! assert!(drag.past_deadzone(Point::new(13.0, 29.0), down, 8.0));
//! assert!(!drag.past_deadzone(Point::new(13.0, 29.0), across, 8.0));
//! ```

use kurbo::{Point, Vec2};

/// Tracks a pointer drag from press to release.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    start_pos: Option<Point>,
}

impl DragState {
    /// Starts tracking a drag pressed at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
    }

    /// Returns `true` if the travel to `pos`, projected on `direction`, is at
    /// least `deadzone`.
    ///
    /// `direction` is a unit vector, typically one of the grid's axes. Always
    /// `false` while no drag is tracked.
    #[must_use]
    pub fn past_deadzone(&self, pos: Point, direction: Vec2, deadzone: f64) -> bool {
        self.start_pos
            .is_some_and(|start| (pos - start).dot(direction).abs() >= deadzone)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
    }
}
