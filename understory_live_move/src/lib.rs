// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_live_move --heading-base-level=0

//! Understory Live Move: reorder a run of sized elements while dragging.
//!
//! A move session is started over a contiguous range of elements with known
//! sizes along one axis (columns by width, rows by height). A sub-range of
//! them, the *moving block*, follows the pointer as one rigid unit while the
//! remaining *stationary* elements make way for it.
//!
//! The insertion point is found by hit-testing the block's leading edge
//! against the midpoints of the stationary elements rather than their bounds,
//! so it does not flap while the pointer hovers near an edge. Target offsets
//! are only recomputed when the insertion point changes.
//!
//! - [`LiveMove`]: the session itself. Stationary elements jump to their
//!   targets; the column-reordering case.
//! - [`AnimatedMove`]: wraps a [`LiveMove`] and eases each displaced element
//!   toward its target over a fixed window; the row-reordering case. Time comes
//!   from an injected [`Clock`], so it is testable with [`ManualClock`].
//! - [`easing`]: the easing curves used for those transitions.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_live_move::LiveMove;
//!
//! // Five columns; drag column 2 to the right, past column 4.
//! let widths = [120.0, 90.0, 100.0, 80.0, 80.0];
//! let mut mv = LiveMove::start(2, 1, 0..5, 0.0, |i| widths[i]);
//! assert_eq!(mv.moving_offset(), 210.0);
//!
//! let offsets = mv.update(210.0 + 130.0);
//! // Columns 3 and 4 moved left by the width of column 2.
//! assert_eq!(offsets[3], 210.0);
//! assert_eq!(offsets[4], 290.0);
//! // Column 2 follows the pointer.
//! assert_eq!(offsets[2], 340.0);
//!
//! let outcome = mv.stop();
//! assert_eq!(outcome.insert_before, 5);
//! assert_eq!(outcome.final_index, 4);
//! assert_eq!(mv.offset_of(2), 370.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables [`StdClock`].
//! - `tracing`: emit `tracing` events when the insertion point changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod animated;
mod clock;
pub mod easing;
mod live_move;

pub use animated::{AnimatedMove, DEFAULT_DURATION};
pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use live_move::{LiveMove, MoveOutcome, MoveRangeError};
