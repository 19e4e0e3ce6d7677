// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component protocol: update options, lifecycle hooks and tree access.

use crate::scheduler::UpdateCx;

/// A merge-able record describing what a component must redo.
///
/// Options accumulate between frames: every call to
/// [`FrameScheduler::request_update`](crate::FrameScheduler::request_update)
/// merges into the record already pending for that component, so the
/// component sees a single update per frame no matter how many times it was
/// invalidated.
pub trait UpdateOptions: Sized {
    /// The record meaning "redo everything".
    fn everything() -> Self;

    /// Folds `other` into `self`.
    fn merge(&mut self, other: Self);
}

impl UpdateOptions for () {
    fn everything() -> Self {}

    fn merge(&mut self, _other: Self) {}
}

/// Lifecycle hooks driven by a [`FrameScheduler`](crate::FrameScheduler).
///
/// Every hook defaults to a no-op, so a component only implements the phases
/// it participates in.
pub trait Component<K, O> {
    /// Applies pending changes.
    ///
    /// Called once per frame with the options merged since the last frame.
    /// The component may mutate its own state but must not read geometry
    /// owned by other components. After this hook returns, the component is
    /// scheduled for measuring and positioning in the same pass.
    fn update(&mut self, opts: &O, cx: &mut UpdateCx<'_, K, O>) {
        let _ = (opts, cx);
    }

    /// Reads geometry. Scheduled ancestors are already positioned.
    fn measure(&mut self) {}

    /// Applies geometry read in [`measure`](Self::measure).
    fn position(&mut self) {}
}

/// Host-side view of the component tree.
///
/// The scheduler never owns components; it only holds keys while work is
/// pending and asks the tree for the component when its turn comes.
pub trait ComponentTree<K, O> {
    /// Returns the parent of `key`, or `None` at a root.
    fn parent(&self, key: K) -> Option<K>;

    /// Returns the component for `key`, or `None` if it no longer exists.
    fn component_mut(&mut self, key: K) -> Option<&mut dyn Component<K, O>>;
}
