// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame scheduler: pending sets and the three-phase pass.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::component::{ComponentTree, UpdateOptions};

/// Counters describing one [`FrameScheduler::run_frame`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of update hooks invoked.
    pub updated: usize,
    /// Number of measure hooks invoked.
    pub measured: usize,
    /// Number of position hooks invoked.
    pub positioned: usize,
    /// Number of requests folded into the pass for components whose update
    /// had already run in it.
    pub folded: usize,
}

/// Batches component updates into one update → measure → position pass.
///
/// # Type Parameters
///
/// - `K`: component key, typically a node identifier. Must be `Copy + Eq + Hash`.
/// - `O`: the [`UpdateOptions`] record merged between frames.
///
/// The scheduler does not drive the frame clock. Requests report whether the
/// host must schedule a frame, and the host calls [`run_frame`](Self::run_frame)
/// from its animation-frame callback.
#[derive(Debug)]
pub struct FrameScheduler<K, O> {
    /// Components that may schedule work.
    attached: HashSet<K>,
    /// Merged pending options, possibly for detached components too.
    options: HashMap<K, O>,
    /// Update queue of the current generation, in request order.
    queue: Vec<K>,
    queued: HashSet<K>,
    /// Components whose update already ran in the pass in progress.
    updated: HashSet<K>,
    /// Requests made this pass for components whose update already ran.
    folded: usize,
    /// Position queue, in request order.
    positions: Vec<K>,
    position_set: HashSet<K>,
    in_pass: bool,
    frame_requested: bool,
}

impl<K, O> Default for FrameScheduler<K, O>
where
    K: Copy + Eq + Hash,
    O: UpdateOptions,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, O> FrameScheduler<K, O>
where
    K: Copy + Eq + Hash,
    O: UpdateOptions,
{
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: HashSet::new(),
            options: HashMap::new(),
            queue: Vec::new(),
            queued: HashSet::new(),
            updated: HashSet::new(),
            folded: 0,
            positions: Vec::new(),
            position_set: HashSet::new(),
            in_pass: false,
            frame_requested: false,
        }
    }

    /// Marks `key` as attached (bound into a live, visible tree).
    ///
    /// If options were merged for `key` while it was detached, it is queued
    /// now. Returns `true` if the host must schedule a frame.
    pub fn attach(&mut self, key: K) -> bool {
        if !self.attached.insert(key) {
            return false;
        }
        if self.options.contains_key(&key) {
            self.enqueue(key)
        } else {
            false
        }
    }

    /// Detaches `key` and drops all of its pending work.
    pub fn detach(&mut self, key: K) {
        self.cancel(key);
        self.attached.remove(&key);
    }

    /// Returns `true` if `key` is attached.
    #[must_use]
    pub fn is_attached(&self, key: K) -> bool {
        self.attached.contains(&key)
    }

    /// Merges `opts` into the update pending for `key`.
    ///
    /// Returns `true` if the host must schedule a frame; `false` if one is
    /// already requested, the request was folded into the pass in progress, or
    /// `key` is not attached (its options are kept until it is).
    pub fn request_update(&mut self, key: K, opts: O) -> bool {
        match self.options.entry(key) {
            Entry::Occupied(mut pending) => pending.get_mut().merge(opts),
            Entry::Vacant(slot) => {
                slot.insert(opts);
            }
        }
        self.enqueue(key)
    }

    /// Requests a full update ([`UpdateOptions::everything`]) for `key`.
    pub fn request_update_all(&mut self, key: K) -> bool {
        self.request_update(key, O::everything())
    }

    /// Asks for `key` to be measured and positioned in the next pass.
    ///
    /// Returns `true` if the host must schedule a frame.
    pub fn request_position(&mut self, key: K) -> bool {
        if !self.attached.contains(&key) {
            return false;
        }
        if self.position_set.insert(key) {
            self.positions.push(key);
        }
        self.request_frame()
    }

    /// Drops pending update options and positioning for `key`.
    pub fn cancel(&mut self, key: K) {
        self.options.remove(&key);
        self.queued.remove(&key);
        self.position_set.remove(&key);
        if !self.in_pass {
            self.queue.retain(|k| *k != key);
            self.positions.retain(|k| *k != key);
        }
    }

    /// Returns `true` if a frame has been requested and not yet run.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frame_requested
    }

    /// Returns `true` if an update is queued for `key`.
    #[must_use]
    pub fn is_update_pending(&self, key: K) -> bool {
        self.queued.contains(&key)
    }

    /// Returns `true` if `key` waits to be measured and positioned.
    #[must_use]
    pub fn is_position_pending(&self, key: K) -> bool {
        self.position_set.contains(&key)
    }

    /// Returns the options merged so far for `key`, if any.
    #[must_use]
    pub fn pending_options(&self, key: K) -> Option<&O> {
        self.options.get(&key)
    }

    /// Runs one update → measure → position pass over all pending work.
    pub fn run_frame<T>(&mut self, tree: &mut T) -> FrameStats
    where
        T: ComponentTree<K, O> + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "frame",
            queued = self.queue.len(),
            positions = self.positions.len()
        )
        .entered();

        self.frame_requested = false;
        self.in_pass = true;
        let mut stats = FrameStats::default();

        // Update phase. Hooks may append to the queue while we walk it.
        let mut i = 0;
        while i < self.queue.len() {
            let key = self.queue[i];
            i += 1;
            if self.updated.contains(&key) || !self.queued.contains(&key) {
                continue;
            }
            let Some(opts) = self.options.remove(&key) else {
                continue;
            };
            self.updated.insert(key);
            let Some(component) = tree.component_mut(key) else {
                continue;
            };
            component.update(&opts, &mut UpdateCx { scheduler: self });
            stats.updated += 1;
            self.request_position(key);
        }

        // Measure/position phase, parents first.
        let mut i = 0;
        while i < self.positions.len() {
            let key = self.positions[i];
            i += 1;
            if self.position_set.contains(&key) {
                self.position_ancestors(tree, key, &mut stats);
            }
        }

        // Only leaves are left: measure all of them, then position all of them.
        let mut leaves = Vec::new();
        for key in core::mem::take(&mut self.positions) {
            if self.position_set.remove(&key) {
                leaves.push(key);
            }
        }
        for &key in &leaves {
            if let Some(component) = tree.component_mut(key) {
                component.measure();
                stats.measured += 1;
            }
        }
        for &key in &leaves {
            if let Some(component) = tree.component_mut(key) {
                component.position();
                stats.positioned += 1;
            }
        }

        self.finish_pass(&mut stats);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            updated = stats.updated,
            measured = stats.measured,
            positioned = stats.positioned,
            folded = stats.folded,
            "frame finished"
        );

        stats
    }

    /// Measures and positions every scheduled strict ancestor of `key`, top-down.
    fn position_ancestors<T>(&mut self, tree: &mut T, key: K, stats: &mut FrameStats)
    where
        T: ComponentTree<K, O> + ?Sized,
    {
        let mut chain: SmallVec<[K; 8]> = SmallVec::new();
        let mut cursor = tree.parent(key);
        while let Some(ancestor) = cursor {
            if self.position_set.contains(&ancestor) {
                chain.push(ancestor);
            }
            cursor = tree.parent(ancestor);
        }
        for &ancestor in chain.iter().rev() {
            if !self.position_set.remove(&ancestor) {
                continue;
            }
            if let Some(component) = tree.component_mut(ancestor) {
                component.measure();
                component.position();
                stats.measured += 1;
                stats.positioned += 1;
            }
        }
    }

    fn finish_pass(&mut self, stats: &mut FrameStats) {
        self.in_pass = false;
        // Late requests were merged into the pass's record; it ends here.
        for key in self.updated.drain() {
            self.options.remove(&key);
        }
        self.queue.clear();
        self.queued.clear();
        self.position_set.clear();
        stats.folded = core::mem::take(&mut self.folded);
    }

    fn enqueue(&mut self, key: K) -> bool {
        if !self.attached.contains(&key) {
            return false;
        }
        if self.in_pass && self.updated.contains(&key) {
            self.folded += 1;
            return false;
        }
        if self.queued.insert(key) {
            self.queue.push(key);
        }
        self.request_frame()
    }

    fn request_frame(&mut self) -> bool {
        if self.in_pass {
            return false;
        }
        !core::mem::replace(&mut self.frame_requested, true)
    }
}

/// Scheduling handle passed to [`Component::update`](crate::Component::update).
///
/// Requests made through it are folded into the pass in progress.
#[derive(Debug)]
pub struct UpdateCx<'a, K, O> {
    scheduler: &'a mut FrameScheduler<K, O>,
}

impl<K, O> UpdateCx<'_, K, O>
where
    K: Copy + Eq + Hash,
    O: UpdateOptions,
{
    /// Merges `opts` into the update pending for `key`.
    pub fn request_update(&mut self, key: K, opts: O) {
        self.scheduler.request_update(key, opts);
    }

    /// Requests a full update for `key`.
    pub fn request_update_all(&mut self, key: K) {
        self.scheduler.request_update_all(key);
    }

    /// Asks for `key` to be measured and positioned in this pass.
    pub fn request_position(&mut self, key: K) {
        self.scheduler.request_position(key);
    }

    /// Returns `true` if `key` is attached.
    #[must_use]
    pub fn is_attached(&self, key: K) -> bool {
        self.scheduler.is_attached(key)
    }
}
