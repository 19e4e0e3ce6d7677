// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row move sessions: animated reordering with tree re-parenting.

use core::ops::Range;

use kurbo::Point;
use understory_live_move::easing::lerp;
use understory_live_move::{AnimatedMove, Clock, LiveMove};

use crate::config::GridConfig;
use crate::layout::to_index;
use crate::source::{GridSource, RowMoveRequest};

/// State of a row move in progress.
///
/// The moving block is the pressed row plus its visible descendants. Rows
/// displaced by the block ease to their new places. In a tree where parents
/// may change, the block's indent follows the insertion point, choosing an
/// adopting parent between the row above and the row below.
#[derive(Clone, Debug)]
pub struct RowMoveSession<C> {
    anim: AnimatedMove<C>,
    field: usize,
    grab: f64,
    pointer: Point,
    next_eval: f64,
    interval: f64,
    row_size: f64,
    tree: bool,
    can_change_parent: bool,
    base_depth: usize,
    hit_depth: usize,
    parent: Option<usize>,
}

impl<C: Clock> RowMoveSession<C> {
    /// Starts moving `row` after it was pressed in `field`.
    ///
    /// `grab` is the pointer offset from the row's leading edge along the row
    /// axis, and `pointer` the pointer position in grid coordinates. Returns
    /// `None` if the source describes a block outside its own move range.
    pub fn start<S: GridSource + ?Sized>(
        source: &S,
        config: &GridConfig,
        row: usize,
        field: usize,
        grab: f64,
        pointer: Point,
        clock: C,
    ) -> Option<Self> {
        let row_size = config.row_size();
        let tree = source.is_tree();
        let block = source.row_move_block(row);
        let range = source.row_move_range(row, config.can_change_parent);
        let grouped = tree && !config.can_change_parent;
        let live = LiveMove::try_start_grouped(
            block.start,
            block.len(),
            range.clone(),
            range.start as f64 * row_size,
            |_| row_size,
            |i| {
                if grouped {
                    1 + source.expanded_descendant_count(i)
                } else {
                    1
                }
            },
        )
        .ok()?;
        let next_eval = clock.now() + config.row_move_interval;
        let base_depth = if tree { source.row_depth(row) } else { 0 };
        Some(Self {
            anim: AnimatedMove::with_duration(live, clock, config.move_ease_duration),
            field,
            grab,
            pointer,
            next_eval,
            interval: config.row_move_interval,
            row_size,
            tree,
            can_change_parent: config.can_change_parent,
            base_depth,
            hit_depth: base_depth,
            parent: if tree { source.row_parent(row) } else { None },
        })
    }

    /// Moves the block's leading edge to `offset` (content coordinates along
    /// the row axis) and re-resolves the adopting parent.
    pub fn update<S: GridSource + ?Sized>(&mut self, source: &S, offset: f64) {
        self.anim.update(offset);
        self.update_parent(source);
    }

    /// Advances the displacement animations. Returns `true` while any row is
    /// still easing.
    pub fn tick(&mut self) -> bool {
        self.anim.tick()
    }

    /// Returns `true` once per re-evaluation interval.
    pub(crate) fn take_due(&mut self) -> bool {
        let now = self.anim.clock().now();
        if now < self.next_eval {
            return false;
        }
        self.next_eval = now + self.interval;
        true
    }

    /// Ends the session and describes the move to commit.
    pub fn finish(&mut self) -> RowMoveRequest {
        let outcome = self.anim.stop();
        RowMoveRequest {
            rows: outcome.from..outcome.from + outcome.count,
            insert_before: outcome.insert_before,
            final_index: outcome.final_index,
            parent: self.parent,
        }
    }

    /// Current offset of `row` along the row axis, in content coordinates.
    #[must_use]
    pub fn row_offset(&self, row: usize) -> f64 {
        if self.anim.live().range().contains(&row) {
            self.anim.offset_of(row)
        } else {
            row as f64 * self.row_size
        }
    }

    /// Rows moving as one block.
    #[must_use]
    pub fn moving_rows(&self) -> Range<usize> {
        self.anim.live().moving_range()
    }

    /// Returns `true` if `row` is part of the moving block.
    #[must_use]
    pub fn is_moving(&self, row: usize) -> bool {
        self.anim.live().is_moving(row)
    }

    /// Span of the moving block along the row axis.
    #[must_use]
    pub fn moving_span(&self) -> Range<f64> {
        let live = self.anim.live();
        let start = live.moving_offset();
        start..start + live.moving_size()
    }

    /// Rows the block travels over.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.anim.live().range()
    }

    /// Row the block would be inserted in front of.
    #[must_use]
    pub fn insertion_index(&self) -> usize {
        self.anim.live().insertion_index()
    }

    /// Parent that would adopt the block, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Tree depth the block would land at.
    #[must_use]
    pub fn hit_depth(&self) -> usize {
        self.hit_depth
    }

    /// Horizontal shift applied to the moving rows' indent so they line up
    /// under the adopting parent.
    #[must_use]
    pub fn indent_shift(&self, config: &GridConfig) -> f64 {
        config.indent_offset(self.hit_depth) - config.indent_offset(self.base_depth)
    }

    /// Returns `true` while displaced rows are still easing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.anim.is_animating()
    }

    /// Field that was pressed to start the move.
    #[must_use]
    pub fn field(&self) -> usize {
        self.field
    }

    /// Pointer offset from the block's leading edge along the row axis.
    #[must_use]
    pub fn grab(&self) -> f64 {
        self.grab
    }

    /// Last pointer position, in grid coordinates.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub(crate) fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    fn update_parent<S: GridSource + ?Sized>(&mut self, source: &S) {
        if !self.tree || !self.can_change_parent {
            return;
        }
        let live = self.anim.live();
        let row1 = live.element_before_insertion();
        let insert = live.insertion_index();
        let row2 = (insert < live.range().end).then_some(insert);
        let i1 = row1.map_or(0, |r| source.row_depth(r));
        let i2 = row2.map_or(0, |r| source.row_depth(r));
        // The row above can take the block as its first child.
        let nests = row1.is_some_and(|r| !source.is_collapsed(r) && source.can_have_children(r));
        let ii1 = i1 + usize::from(nests);
        let depth = lerp((ii1 + 1) as f64, i2 as f64, live.insertion_progress());
        let hit = to_index(libm::floor(depth)).min(ii1);

        self.hit_depth = hit;
        self.parent = if hit > i1 {
            row1
        } else {
            let mut parent = row1;
            for _ in 0..=(i1 - hit) {
                parent = parent.and_then(|r| source.row_parent(r));
            }
            parent
        };
    }
}
