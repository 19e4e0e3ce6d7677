// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: a headless, virtualized data grid.
//!
//! The grid lays out a header and a scrollable area of cells, draws only the
//! rows that intersect the viewport, and turns pointer input into resizes,
//! sorts, column moves and row moves. It owns no data and no rendering
//! backend:
//!
//! - rows come from a [`GridSource`], which also draws cell values and
//!   receives committed moves and resizes;
//! - drawing goes through the [`Canvas`] trait; [`RecordingCanvas`] records
//!   what would be drawn, for tests and debugging;
//! - animation time comes from a [`Clock`](understory_live_move::Clock).
//!
//! Two orientations are supported. A [`Horizontal`](Orientation::Horizontal)
//! grid is a normal table; a [`Vertical`](Orientation::Vertical) grid stacks
//! rows left to right with the header as a column. Geometry is computed along
//! a *row axis* and a *field axis* (see [`Axis`]).
//!
//! The parts can also be used on their own:
//!
//! - [`GridLayout`]: header, client and content geometry, with column
//!   stretching and the resize freeze.
//! - [`GridViewport`]: clamped scroll offsets and the visible row range.
//! - [`hit_test`] and [`HitState`]: the interaction state machine's hover
//!   resolution.
//! - [`RowMoveSession`]: animated row reordering with tree re-parenting, on
//!   top of [`understory_live_move`].
//!
//! [`Grid`] implements [`Component`](understory_frame::Component) with
//! [`GridChanges`] as its update options, so a host can schedule it with a
//! [`FrameScheduler`](understory_frame::FrameScheduler).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_grid::{GridConfig, GridLayout, GridViewport, Field};
//!
//! let config = GridConfig::default();
//! let fields = vec![Field::new("name"), Field::new("size")];
//! let layout = GridLayout::compute(&config, &fields, 10_000, Size::new(400.0, 300.0), None);
//! let mut viewport = GridViewport::new(&layout, 0);
//!
//! viewport.set_scroll(Vec2::new(0.0, 2600.0));
//! // Rows are 26px tall: row 100 is the first one in view.
//! assert_eq!(viewport.visible_rows().start, 100);
//! ```
//!
//! ## Features
//!
//! - `std` (default): compile Kurbo and Peniko against the standard library.
//! - `libm`: use `libm` for Kurbo and Peniko float math in `no_std` builds.
//! - `serde`: derive `Serialize`/`Deserialize` for the configuration and
//!   committed-move records.
//! - `tracing`: emit `tracing` events for state transitions and commits.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod canvas;
mod config;
mod drag;
mod events;
mod field;
mod grid;
mod hit;
mod layout;
mod orientation;
mod paint;
mod row_move;
mod source;
mod theme;
mod viewport;

pub use canvas::{Canvas, CanvasEvent, CanvasOp, Dash, FontRole, Glyph, RecordingCanvas};
pub use config::GridConfig;
pub use drag::DragState;
pub use events::{CellRef, GridChanges, GridEvent};
pub use field::{Align, Field, FieldGeometry, SortDir};
pub use grid::Grid;
pub use hit::{Capture, HitKind, HitState, Modifiers, PointerResponse, ResizeTarget, hit_test};
pub use layout::{GridLayout, Overflow, ResizeFreeze, scrollbox_client_size};
pub use orientation::{Axis, HorizontalAxis, Orientation, VerticalAxis};
pub use paint::PaintStats;
pub use row_move::RowMoveSession;
pub use source::{CellPaint, CellState, GridSource, RowMoveRequest, RowState};
pub use theme::GridTheme;
pub use viewport::{GridViewport, GridViewportDebugInfo};
