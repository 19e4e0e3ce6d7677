// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

/// Error returned by [`LiveMove::try_start`] for an invalid session.
#[derive(Clone, PartialEq)]
pub enum MoveRangeError {
    /// The moving block has no elements.
    EmptyMove,
    /// The moving block is not contained in the participating range.
    OutsideRange {
        /// The requested moving block.
        moving: Range<usize>,
        /// The participating range.
        range: Range<usize>,
    },
    /// An element reported a negative or non-finite size.
    InvalidSize {
        /// Index of the element.
        index: usize,
        /// The reported size.
        size: f64,
    },
}

impl fmt::Debug for MoveRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMove => write!(f, "MoveRangeError::EmptyMove"),
            Self::OutsideRange { moving, range } => write!(
                f,
                "MoveRangeError::OutsideRange {{ moving: {moving:?}, range: {range:?} }}"
            ),
            Self::InvalidSize { index, size } => write!(
                f,
                "MoveRangeError::InvalidSize {{ index: {index}, size: {size} }}"
            ),
        }
    }
}

impl fmt::Display for MoveRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMove => write!(f, "cannot move an empty block"),
            Self::OutsideRange { moving, range } => {
                write!(f, "moving block {moving:?} is outside range {range:?}")
            }
            Self::InvalidSize { index, size } => {
                write!(f, "element {index} has invalid size {size}")
            }
        }
    }
}

impl core::error::Error for MoveRangeError {}

/// Result of [`LiveMove::stop`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Index of the first moved element before the move.
    pub from: usize,
    /// Number of moved elements.
    pub count: usize,
    /// Original index of the element the block was dropped in front of, or
    /// the end of the range when dropped last.
    pub insert_before: usize,
    /// Index of the first moved element once the block is removed and
    /// re-inserted.
    pub final_index: usize,
}

impl MoveOutcome {
    /// Returns `true` if the block ends where it started.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.final_index == self.from
    }
}

/// A run of stationary elements that moves and hit-tests as one piece.
#[derive(Copy, Clone, Debug)]
struct Unit {
    /// First element index.
    start: usize,
    /// Number of elements.
    len: usize,
    /// Offset in the stationary-only layout, relative to the origin.
    offset: f64,
    size: f64,
}

/// A live reordering session over `[range.start, range.end)`.
///
/// Offsets are absolute: element `range.start` rests at `origin_offset` and
/// every following element rests right after its predecessor.
#[derive(Clone, Debug)]
pub struct LiveMove {
    range: Range<usize>,
    moving: Range<usize>,
    origin: f64,
    sizes: Vec<f64>,
    moving_size: f64,
    units: Vec<Unit>,
    /// Midpoint of each unit in the stationary-only layout.
    thresholds: Vec<f64>,
    /// Total size of the stationary elements; the block's leading edge travels
    /// over `[0, travel]` relative to the origin.
    travel: f64,
    block: f64,
    insertion: usize,
    progress: f64,
    targets: Vec<f64>,
    positions: Vec<f64>,
}

impl LiveMove {
    /// Starts a session moving `move_count` elements from `move_index`.
    ///
    /// `size_of` is called once for each index in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the session is invalid; see [`try_start`](Self::try_start).
    #[must_use]
    pub fn start(
        move_index: usize,
        move_count: usize,
        range: Range<usize>,
        origin_offset: f64,
        size_of: impl FnMut(usize) -> f64,
    ) -> Self {
        Self::start_grouped(move_index, move_count, range, origin_offset, size_of, |_| 1)
    }

    /// Like [`start`](Self::start), with stationary elements grouped.
    ///
    /// `group_len(i)` is called for the first element `i` of each stationary
    /// group and returns how many elements the group spans (at least one).
    /// A group moves and hit-tests as a single unit, and the block can only be
    /// inserted at group starts. Groups never extend into the moving block or
    /// past the end of the range.
    ///
    /// # Panics
    ///
    /// Panics if the session is invalid; see [`try_start`](Self::try_start).
    #[must_use]
    pub fn start_grouped(
        move_index: usize,
        move_count: usize,
        range: Range<usize>,
        origin_offset: f64,
        size_of: impl FnMut(usize) -> f64,
        group_len: impl FnMut(usize) -> usize,
    ) -> Self {
        match Self::try_start_grouped(
            move_index,
            move_count,
            range,
            origin_offset,
            size_of,
            group_len,
        ) {
            Ok(session) => session,
            Err(err) => panic!("invalid live-move session: {err}"),
        }
    }

    /// Starts a session, validating its parameters.
    ///
    /// # Errors
    ///
    /// - [`MoveRangeError::EmptyMove`] if `move_count == 0`.
    /// - [`MoveRangeError::OutsideRange`] if the moving block is not inside
    ///   `range`.
    /// - [`MoveRangeError::InvalidSize`] if an element size is negative or not
    ///   finite.
    pub fn try_start(
        move_index: usize,
        move_count: usize,
        range: Range<usize>,
        origin_offset: f64,
        size_of: impl FnMut(usize) -> f64,
    ) -> Result<Self, MoveRangeError> {
        Self::try_start_grouped(move_index, move_count, range, origin_offset, size_of, |_| 1)
    }

    /// Grouped variant of [`try_start`](Self::try_start).
    ///
    /// # Errors
    ///
    /// See [`try_start`](Self::try_start).
    pub fn try_start_grouped(
        move_index: usize,
        move_count: usize,
        range: Range<usize>,
        origin_offset: f64,
        mut size_of: impl FnMut(usize) -> f64,
        mut group_len: impl FnMut(usize) -> usize,
    ) -> Result<Self, MoveRangeError> {
        if move_count == 0 {
            return Err(MoveRangeError::EmptyMove);
        }
        let moving = move_index..move_index.saturating_add(move_count);
        if moving.start < range.start || moving.end > range.end {
            return Err(MoveRangeError::OutsideRange { moving, range });
        }

        let mut sizes = Vec::with_capacity(range.len());
        for index in range.clone() {
            let size = size_of(index);
            if !size.is_finite() || size < 0.0 {
                return Err(MoveRangeError::InvalidSize { index, size });
            }
            sizes.push(size);
        }
        let origin = if origin_offset.is_finite() {
            origin_offset
        } else {
            0.0
        };

        let mut units = Vec::new();
        let mut offset = 0.0;
        let mut i = range.start;
        while i < range.end {
            if moving.contains(&i) {
                i = moving.end;
                continue;
            }
            let limit = if i < moving.start {
                moving.start
            } else {
                range.end
            };
            let len = group_len(i).clamp(1, limit - i);
            let size: f64 = sizes[i - range.start..i - range.start + len].iter().sum();
            units.push(Unit {
                start: i,
                len,
                offset,
                size,
            });
            offset += size;
            i += len;
        }
        let thresholds = units.iter().map(|u| u.offset + u.size / 2.0).collect();
        let moving_size = sizes[moving.start - range.start..moving.end - range.start]
            .iter()
            .sum();
        let insertion = units.partition_point(|u| u.start < moving.start);

        let mut session = Self {
            targets: Vec::with_capacity(sizes.len()),
            positions: Vec::with_capacity(sizes.len()),
            range,
            moving,
            origin,
            sizes,
            moving_size,
            units,
            thresholds,
            travel: offset,
            block: 0.0,
            insertion,
            progress: 0.0,
        };
        session.block = session.insertion_offset();
        session.progress = session.progress_at(session.block);
        session.layout_targets();
        session.positions.clone_from(&session.targets);
        Ok(session)
    }

    /// Moves the block's leading edge to `offset` and returns live offsets for
    /// every element in the range, indexed from `range().start`.
    ///
    /// The offset is clamped so the block stays inside the range. Stationary
    /// elements are placed at their targets; the moving block follows `offset`.
    /// A non-finite offset leaves the block where it is.
    pub fn update(&mut self, offset: f64) -> &[f64] {
        let rel = if offset.is_finite() {
            (offset - self.origin).clamp(0.0, self.travel)
        } else {
            self.block
        };
        self.block = rel;
        let insertion = self.thresholds.partition_point(|mid| *mid <= rel);
        let changed = insertion != self.insertion;
        self.insertion = insertion;
        self.progress = self.progress_at(rel);
        if changed {
            self.layout_targets();
            for (index, target) in self.targets.iter().enumerate() {
                if !self.moving.contains(&(index + self.range.start)) {
                    self.positions[index] = *target;
                }
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                insert_before = self.insertion_index(),
                progress = self.progress,
                "live-move insertion changed"
            );
        }
        self.place_block(self.origin + rel);
        &self.positions
    }

    /// Ends the session, snapping the moving block to its target offset.
    pub fn stop(&mut self) -> MoveOutcome {
        let block = self.origin + self.insertion_offset();
        self.block = block - self.origin;
        self.place_block(block);
        let insert_before = self.insertion_index();
        let final_index = if insert_before >= self.moving.end {
            insert_before - self.moving.len()
        } else {
            insert_before
        };
        MoveOutcome {
            from: self.moving.start,
            count: self.moving.len(),
            insert_before,
            final_index,
        }
    }

    /// Original index of the element the block would be inserted in front of,
    /// or `range().end` when it would be inserted last.
    #[must_use]
    pub fn insertion_index(&self) -> usize {
        self.units
            .get(self.insertion)
            .map_or(self.range.end, |u| u.start)
    }

    /// Fraction (`0..=1`) of the way from the previous threshold to the next.
    ///
    /// Near `0` the block hugs the element before the insertion point, near
    /// `1` the element after it.
    #[must_use]
    pub fn insertion_progress(&self) -> f64 {
        self.progress
    }

    /// Last stationary element in front of the insertion point, if any.
    #[must_use]
    pub fn element_before_insertion(&self) -> Option<usize> {
        let unit = self.units.get(self.insertion.checked_sub(1)?)?;
        Some(unit.start + unit.len - 1)
    }

    /// Live offsets, indexed from `range().start`.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Resting offsets for the current insertion point, indexed from
    /// `range().start`.
    #[must_use]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Live offset of element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `range()`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        assert!(
            self.range.contains(&index),
            "index {index} outside live-move range {:?}",
            self.range
        );
        self.positions[index - self.range.start]
    }

    /// Resting offset of element `index` for the current insertion point.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `range()`.
    #[must_use]
    pub fn target_of(&self, index: usize) -> f64 {
        assert!(
            self.range.contains(&index),
            "index {index} outside live-move range {:?}",
            self.range
        );
        self.targets[index - self.range.start]
    }

    /// Size of element `index` as captured at start.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `range()`.
    #[must_use]
    pub fn size_of(&self, index: usize) -> f64 {
        assert!(
            self.range.contains(&index),
            "index {index} outside live-move range {:?}",
            self.range
        );
        self.sizes[index - self.range.start]
    }

    /// Live offset of the moving block's leading edge.
    #[must_use]
    pub fn moving_offset(&self) -> f64 {
        self.origin + self.block
    }

    /// Combined size of the moving block.
    #[must_use]
    pub fn moving_size(&self) -> f64 {
        self.moving_size
    }

    /// The moving block.
    #[must_use]
    pub fn moving_range(&self) -> Range<usize> {
        self.moving.clone()
    }

    /// All participating elements.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns `true` if `index` belongs to the moving block.
    #[must_use]
    pub fn is_moving(&self, index: usize) -> bool {
        self.moving.contains(&index)
    }

    /// Span over which the block's leading edge may travel.
    #[must_use]
    pub fn extent(&self) -> Range<f64> {
        self.origin..self.origin + self.travel
    }

    /// Offset of the insertion point relative to the origin.
    fn insertion_offset(&self) -> f64 {
        self.units
            .get(self.insertion)
            .map_or(self.travel, |u| u.offset)
    }

    fn progress_at(&self, rel: f64) -> f64 {
        let k = self.insertion.min(self.thresholds.len());
        let lo = if k == 0 { 0.0 } else { self.thresholds[k - 1] };
        let hi = self.thresholds.get(k).copied().unwrap_or(self.travel);
        if hi > lo {
            ((rel - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn layout_targets(&mut self) {
        let base = self.range.start;
        self.targets.clear();
        self.targets.resize(self.sizes.len(), 0.0);
        for (k, unit) in self.units.iter().enumerate() {
            let mut offset = self.origin + unit.offset;
            if k >= self.insertion {
                offset += self.moving_size;
            }
            for i in unit.start..unit.start + unit.len {
                self.targets[i - base] = offset;
                offset += self.sizes[i - base];
            }
        }
        let mut offset = self.origin + self.insertion_offset();
        for i in self.moving.clone() {
            self.targets[i - base] = offset;
            offset += self.sizes[i - base];
        }
    }

    fn place_block(&mut self, mut offset: f64) {
        let base = self.range.start;
        for i in self.moving.clone() {
            self.positions[i - base] = offset;
            offset += self.sizes[i - base];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn uniform(n: usize, size: f64) -> impl FnMut(usize) -> f64 {
        move |i| {
            assert!(i < n, "size requested outside the range");
            size
        }
    }

    #[test]
    fn starts_at_rest() {
        let mv = LiveMove::start(2, 1, 0..5, 10.0, uniform(5, 20.0));
        assert_eq!(mv.positions(), &[10.0, 30.0, 50.0, 70.0, 90.0]);
        assert_eq!(mv.targets(), mv.positions());
        assert_eq!(mv.insertion_index(), 3);
        assert_eq!(mv.moving_offset(), 50.0);
        assert_eq!(mv.extent(), 10.0..90.0);
    }

    #[test]
    fn try_start_rejects_bad_sessions() {
        assert_eq!(
            LiveMove::try_start(0, 0, 0..3, 0.0, |_| 1.0).unwrap_err(),
            MoveRangeError::EmptyMove
        );
        assert_eq!(
            LiveMove::try_start(2, 2, 0..3, 0.0, |_| 1.0).unwrap_err(),
            MoveRangeError::OutsideRange {
                moving: 2..4,
                range: 0..3
            }
        );
        assert!(matches!(
            LiveMove::try_start(0, 1, 0..3, 0.0, |i| if i == 1 { f64::NAN } else { 1.0 }),
            Err(MoveRangeError::InvalidSize { index: 1, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "invalid live-move session")]
    fn start_panics_on_bad_range() {
        let _ = LiveMove::start(4, 1, 0..3, 0.0, |_| 1.0);
    }

    #[test]
    fn midpoint_thresholds_decide_insertion() {
        let mut mv = LiveMove::start(0, 1, 0..3, 0.0, uniform(3, 10.0));
        // Stationary layout: [1] at 0..10, [2] at 10..20. Midpoints 5 and 15.
        mv.update(4.9);
        assert_eq!(mv.insertion_index(), 1);
        mv.update(5.0);
        assert_eq!(mv.insertion_index(), 2);
        assert_eq!(mv.offset_of(1), 0.0);
        mv.update(15.0);
        assert_eq!(mv.insertion_index(), 3);
        assert_eq!(mv.offset_of(2), 10.0);
    }

    #[test]
    fn progress_interpolates_between_thresholds() {
        let mut mv = LiveMove::start(0, 1, 0..3, 0.0, uniform(3, 10.0));
        mv.update(10.0);
        assert_eq!(mv.insertion_index(), 2);
        assert_eq!(mv.insertion_progress(), 0.5);
        mv.update(20.0);
        assert_eq!(mv.insertion_index(), 3);
        assert_eq!(mv.insertion_progress(), 1.0);
    }

    #[test]
    fn moving_backward_places_block_before_insertion() {
        let mut mv = LiveMove::start(3, 1, 0..4, 0.0, uniform(4, 10.0));
        mv.update(-50.0);
        assert_eq!(mv.moving_offset(), 0.0);
        assert_eq!(mv.insertion_index(), 0);
        assert_eq!(mv.targets(), &[10.0, 20.0, 30.0, 0.0]);
        let out = mv.stop();
        assert_eq!(out.insert_before, 0);
        assert_eq!(out.final_index, 0);
        assert!(!out.is_unchanged());
    }

    #[test]
    fn non_finite_offsets_keep_the_block() {
        let mut mv = LiveMove::start(1, 1, 0..3, 0.0, uniform(3, 10.0));
        mv.update(17.0);
        mv.update(f64::NAN);
        assert_eq!(mv.moving_offset(), 17.0);
    }

    #[test]
    fn groups_hit_test_as_one_unit() {
        // Element 1 spans 1..4 (an expanded tree row with two children).
        let mut mv = LiveMove::start_grouped(
            0,
            1,
            0..5,
            0.0,
            uniform(5, 10.0),
            |i| if i == 1 { 3 } else { 1 },
        );
        // Group midpoint is 15: before it the block stays first.
        mv.update(14.0);
        assert_eq!(mv.insertion_index(), 1);
        mv.update(16.0);
        assert_eq!(mv.insertion_index(), 4);
        assert_eq!(mv.targets(), &[30.0, 0.0, 10.0, 20.0, 40.0]);
        assert_eq!(mv.element_before_insertion(), Some(3));
    }

    #[test]
    fn groups_stop_at_the_moving_block() {
        let mv = LiveMove::start_grouped(3, 1, 0..5, 0.0, uniform(5, 10.0), |_| 10);
        // The group at 0 is cut at the block, the group at 4 at the range end.
        assert_eq!(mv.insertion_index(), 4);
        assert_eq!(mv.thresholds, vec![15.0, 35.0]);
    }

    #[test]
    fn sub_range_uses_absolute_indices() {
        let mut mv = LiveMove::start(5, 1, 4..7, 100.0, uniform(7, 10.0));
        assert_eq!(mv.offset_of(5), 110.0);
        mv.update(130.0);
        assert_eq!(mv.offset_of(6), 110.0);
        let out = mv.stop();
        assert_eq!(out.insert_before, 7);
        assert_eq!(out.final_index, 6);
        assert_eq!(mv.size_of(4), 10.0);
    }
}
