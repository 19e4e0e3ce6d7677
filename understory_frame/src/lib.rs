// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_frame --heading-base-level=0

//! Understory Frame: deferred, three-phase component updates.
//!
//! Widgets that measure themselves (popups, canvases, virtualized grids) need
//! the tree they depend on to be fully updated before they read any geometry.
//! Interleaving "write some state, read some geometry" across many widgets
//! forces the host to re-run layout over and over. This crate batches that work
//! into one pass per frame, split into three phases:
//!
//! 1. **Update**: every component with pending work gets its merged options.
//!    Components only mutate their own state here; they must not read geometry
//!    owned by other components, since update order is unspecified.
//! 2. **Measure**: components that asked to be positioned measure themselves.
//!    Before a component is measured, every scheduled ancestor has already been
//!    measured *and* positioned, top-down.
//! 3. **Position**: components apply what they measured.
//!
//! The core types are:
//!
//! - [`UpdateOptions`]: a merge-able record of "what changed" that accumulates
//!   between frames.
//! - [`Component`]: the lifecycle hooks, all defaulting to no-ops.
//! - [`ComponentTree`]: implemented by the host to expose parent links and
//!   component access.
//! - [`FrameScheduler`]: the pending sets and the pass itself. There is no
//!   global state; hosts create one scheduler per independent UI tree.
//! - [`UpdateCx`]: handed to update hooks so they can request more work, which
//!   is folded into the pass already in progress.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_frame::{Component, ComponentTree, FrameScheduler, UpdateCx, UpdateOptions};
//!
//! #[derive(Default)]
//! struct Changes {
//!     text: bool,
//!     size: bool,
//! }
//!
//! impl UpdateOptions for Changes {
//!     fn everything() -> Self {
//!         Self { text: true, size: true }
//!     }
//!
//!     fn merge(&mut self, other: Self) {
//!         self.text |= other.text;
//!         self.size |= other.size;
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Label {
//!     updates: u32,
//! }
//!
//! impl Component<u32, Changes> for Label {
//!     fn update(&mut self, _opts: &Changes, _cx: &mut UpdateCx<'_, u32, Changes>) {
//!         self.updates += 1;
//!     }
//! }
//!
//! struct Tree {
//!     label: Label,
//! }
//!
//! impl ComponentTree<u32, Changes> for Tree {
//!     fn parent(&self, _key: u32) -> Option<u32> {
//!         None
//!     }
//!
//!     fn component_mut(&mut self, key: u32) -> Option<&mut dyn Component<u32, Changes>> {
//!         (key == 1).then_some(&mut self.label as &mut dyn Component<u32, Changes>)
//!     }
//! }
//!
//! let mut tree = Tree { label: Label::default() };
//! let mut scheduler = FrameScheduler::new();
//! scheduler.attach(1);
//!
//! // Two requests before the frame: one merged update.
//! assert!(scheduler.request_update(1, Changes { text: true, size: false }));
//! assert!(!scheduler.request_update(1, Changes { text: false, size: true }));
//!
//! let stats = scheduler.run_frame(&mut tree);
//! assert_eq!(stats.updated, 1);
//! assert_eq!(tree.label.updates, 1);
//! assert!(!scheduler.needs_frame());
//! ```
//!
//! ## Re-entrancy
//!
//! Requests made from inside an update hook never schedule a second frame.
//! A component that has not been updated yet in the current pass is appended
//! to the pass. A request for a component whose update already ran is merged
//! into that pass's record and ends with it: the component is still measured
//! and positioned, and no further frame is scheduled. This bounds every pass
//! to a single generation of work and rules out scheduling loops;
//! [`FrameStats::folded`] reports how many requests were folded this way.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for every pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod component;
mod scheduler;

pub use component::{Component, ComponentTree, UpdateOptions};
pub use scheduler::{FrameScheduler, FrameStats, UpdateCx};
