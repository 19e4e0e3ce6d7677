// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller: owns geometry and interaction state, turns pointer
//! input into commits and events, and paints.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use understory_frame::{Component, UpdateCx};
use understory_live_move::{Clock, LiveMove};

use crate::canvas::Canvas;
use crate::config::GridConfig;
use crate::drag::DragState;
use crate::events::{CellRef, GridChanges, GridEvent};
use crate::field::{Field, SortDir};
use crate::hit::{HitState, Modifiers, PointerResponse, ResizeTarget, hit_test};
use crate::layout::{GridLayout, ResizeFreeze};
use crate::paint::{PaintCx, PaintStats};
use crate::row_move::RowMoveSession;
use crate::source::GridSource;
use crate::theme::GridTheme;
use crate::viewport::GridViewport;

/// A virtualized data grid.
///
/// `S` supplies rows and draws cell values, `C` is the canvas the grid paints
/// into and `T` is the clock driving row-move animations.
///
/// The grid is headless: the host forwards pointer input in grid
/// coordinates, calls [`tick`](Self::tick) while [`tick`](Self::tick) keeps
/// returning `true`, and repaints when [`take_changes`](Self::take_changes)
/// is non-empty, either directly through
/// [`apply_changes`](Self::apply_changes) or by handing the changes to a
/// [`FrameScheduler`](understory_frame::FrameScheduler), since the grid is a
/// [`Component`].
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_grid::{
///     Canvas, CellPaint, Field, Grid, GridConfig, GridEvent, GridSource, HitKind, Modifiers,
///     RecordingCanvas,
/// };
/// use understory_live_move::ManualClock;
///
/// struct Numbers;
///
/// impl GridSource for Numbers {
///     type Value = usize;
///
///     fn row_count(&self) -> usize {
///         1000
///     }
///
///     fn cell_value(&self, row: usize, field: usize) -> usize {
///         row * 10 + field
///     }
///
///     fn draw_cell(&mut self, _: usize, _: usize, _: &usize, _: &mut dyn Canvas, _: &CellPaint) {}
/// }
///
/// let fields = vec![Field::new("a"), Field::new("b")];
/// let mut grid = Grid::new(
///     GridConfig::default(),
///     fields,
///     Numbers,
///     RecordingCanvas::new(14.0),
///     ManualClock::new(),
/// );
/// grid.attach(Size::new(400.0, 300.0));
///
/// // Press and release on the second cell of row 1.
/// let p = Point::new(150.0, 26.0 + 1.0 + 26.0 + 10.0);
/// grid.pointer_move(p, Modifiers::empty());
/// assert_eq!(grid.hit_state().kind(), HitKind::Cell);
/// grid.pointer_down(p, Modifiers::empty());
/// grid.pointer_up(p, Modifiers::empty());
/// grid.click(p);
///
/// let events = grid.drain_events();
/// assert!(events.contains(&GridEvent::CellClick(understory_grid::CellRef::new(1, 1))));
/// ```
#[derive(Debug)]
pub struct Grid<S, C, T> {
    config: GridConfig,
    theme: GridTheme,
    fields: Vec<Field>,
    source: S,
    canvas: C,
    clock: T,
    attached: bool,
    container: Size,
    layout: GridLayout,
    viewport: GridViewport,
    freeze: Option<ResizeFreeze>,
    hit: HitState,
    drag: DragState,
    pointer: Option<Point>,
    col_move: Option<LiveMove>,
    row_move: Option<RowMoveSession<T>>,
    focus: Option<CellRef>,
    has_focus: bool,
    editor_open: bool,
    pending: GridChanges,
    events: Vec<GridEvent>,
}

impl<S, C, T> Grid<S, C, T>
where
    S: GridSource,
    C: Canvas,
    T: Clock + Clone,
{
    /// Creates a detached grid.
    pub fn new(config: GridConfig, fields: Vec<Field>, source: S, canvas: C, clock: T) -> Self {
        let layout = GridLayout::compute(&config, &fields, source.row_count(), Size::ZERO, None);
        let viewport = GridViewport::new(&layout, config.overscan);
        Self {
            config,
            theme: GridTheme::default(),
            fields,
            source,
            canvas,
            clock,
            attached: false,
            container: Size::ZERO,
            layout,
            viewport,
            freeze: None,
            hit: HitState::None,
            drag: DragState::default(),
            pointer: None,
            col_move: None,
            row_move: None,
            focus: None,
            has_focus: false,
            editor_open: false,
            pending: GridChanges::all(),
            events: Vec::new(),
        }
    }

    // --- lifecycle ---

    /// Attaches the grid to a container of the given size.
    pub fn attach(&mut self, container: Size) {
        self.attached = true;
        self.container = container;
        self.relayout();
        self.request(GridChanges::all());
        gdebug!(
            width = self.container.width,
            height = self.container.height,
            "grid attached"
        );
    }

    /// Detaches the grid, abandoning any drag and animation.
    pub fn detach(&mut self) {
        self.cancel_interaction();
        self.attached = false;
        self.pointer = None;
        self.pending = GridChanges::empty();
        gdebug!("grid detached");
    }

    /// Returns `true` between [`attach`](Self::attach) and
    /// [`detach`](Self::detach).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Resizes the container.
    pub fn resize(&mut self, container: Size) {
        if container == self.container {
            return;
        }
        self.container = container;
        self.relayout();
        self.request(GridChanges::SIZE);
    }

    // --- configuration and data ---

    /// Grid configuration.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replaces the configuration. Any drag in progress is cancelled.
    pub fn set_config(&mut self, config: GridConfig) {
        self.cancel_interaction();
        self.config = config;
        self.relayout();
        self.request(GridChanges::all());
    }

    /// Colors.
    #[must_use]
    pub fn theme(&self) -> &GridTheme {
        &self.theme
    }

    /// Replaces the colors.
    pub fn set_theme(&mut self, theme: GridTheme) {
        self.theme = theme;
        self.request(GridChanges::THEME);
    }

    /// Fields, in column order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Replaces the fields. Any drag in progress is cancelled.
    pub fn set_fields(&mut self, fields: Vec<Field>) {
        self.cancel_interaction();
        self.fields = fields;
        self.relayout();
        self.request(GridChanges::FIELDS);
    }

    /// The data source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The data source, for mutation. Call
    /// [`rows_changed`](Self::rows_changed) after changing rows.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Re-reads the row count after the source changed.
    pub fn rows_changed(&mut self) {
        if self.row_move.is_some() {
            self.cancel_interaction();
        }
        self.relayout();
        self.request(GridChanges::ROWS);
    }

    /// The canvas the grid paints into.
    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The canvas, for mutation.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// The animation clock.
    #[must_use]
    pub fn clock(&self) -> &T {
        &self.clock
    }

    // --- queries ---

    /// Current geometry.
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Current scroll state.
    #[must_use]
    pub fn viewport(&self) -> &GridViewport {
        &self.viewport
    }

    /// Current hit state.
    #[must_use]
    pub fn hit_state(&self) -> HitState {
        self.hit
    }

    /// Rows drawn by the next paint, overscan included.
    #[must_use]
    pub fn visible_row_range(&self) -> Range<usize> {
        self.viewport.visible_rows()
    }

    /// Rectangle of cell (`row`, `field`), in content coordinates.
    #[must_use]
    pub fn cell_rect(&self, row: usize, field: usize) -> Rect {
        self.layout.cell_rect(row, field)
    }

    /// Rectangle of the header cell of `field`, in header coordinates.
    #[must_use]
    pub fn header_cell_rect(&self, field: usize) -> Rect {
        self.layout.header_cell_rect(field)
    }

    /// Returns `true` if there are no rows; the host shows its placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layout.row_count() == 0
    }

    /// The focused cell.
    #[must_use]
    pub fn focused_cell(&self) -> Option<CellRef> {
        self.focus
    }

    /// Returns `true` if the grid has keyboard focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Returns `true` while the host has an editor open on the focused cell.
    #[must_use]
    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    /// Column move in progress, if any.
    #[must_use]
    pub fn col_move(&self) -> Option<&LiveMove> {
        self.col_move.as_ref()
    }

    /// Row move in progress, if any.
    #[must_use]
    pub fn row_move(&self) -> Option<&RowMoveSession<T>> {
        self.row_move.as_ref()
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        core::mem::take(&mut self.events)
    }

    // --- commands ---

    /// Scrolls the minimum needed to reveal cell (`row`, `field`).
    pub fn scroll_to_cell(&mut self, row: usize, field: usize) -> bool {
        let rect = self.layout.cell_rect(row, field);
        let changed = self.viewport.scroll_to_rect(rect);
        self.scrolled(changed);
        changed
    }

    /// Scrolls the minimum needed to reveal `row` along the row axis.
    pub fn scroll_to_row(&mut self, row: usize) -> bool {
        let changed = self.viewport.scroll_to_row_span(self.layout.rows_span(row..row + 1));
        self.scrolled(changed);
        changed
    }

    /// Applies a scroll offset coming from the host's scroll container.
    ///
    /// Ignored while rows are being moved, since the move drives scrolling
    /// itself. Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, offset: Vec2) -> bool {
        if self.row_move.is_some() {
            return false;
        }
        let changed = self.viewport.set_scroll(offset);
        self.scrolled(changed);
        changed
    }

    /// Moves focus to `cell`, or clears it. Out-of-range cells clear focus.
    pub fn set_focused_cell(&mut self, cell: Option<CellRef>) {
        let cell = cell.filter(|c| c.row < self.layout.row_count() && c.field < self.fields.len());
        self.set_focus(cell);
    }

    /// Tells the grid whether it has keyboard focus.
    pub fn set_has_focus(&mut self, focused: bool) {
        if self.has_focus != focused {
            self.has_focus = focused;
            self.request(GridChanges::FOCUS);
        }
    }

    /// Tells the grid whether the host has an editor open on the focused
    /// cell. Rows cannot be moved while an editor is open.
    pub fn set_editor_open(&mut self, open: bool) {
        if self.editor_open != open {
            self.editor_open = open;
            self.request(GridChanges::FOCUS);
        }
    }

    /// Advances a field's sort state `Asc → Desc → unsorted`.
    ///
    /// Unless `multi`, every other field stops being sorted. Sort priorities
    /// stay dense, in the order fields joined the sort.
    pub fn toggle_sort(&mut self, field: usize, multi: bool) {
        let Some(f) = self.fields.get(field) else {
            return;
        };
        if !f.sortable {
            return;
        }
        let was_sorted = f.sort.is_some();
        let dir = SortDir::toggled(f.sort);
        if !multi {
            for (fi, other) in self.fields.iter_mut().enumerate() {
                if fi != field {
                    other.sort = None;
                }
            }
        }
        if dir.is_some() && !was_sorted {
            // Joins the sort last.
            self.fields[field].sort_priority = u32::MAX;
        }
        self.fields[field].sort = dir;

        let mut sorted: SmallVec<[usize; 4]> = (0..self.fields.len())
            .filter(|fi| self.fields[*fi].sort.is_some())
            .collect();
        sorted.sort_by_key(|fi| self.fields[*fi].sort_priority);
        for f in &mut self.fields {
            f.sort_priority = 0;
        }
        for (priority, fi) in (0_u32..).zip(sorted) {
            self.fields[fi].sort_priority = priority;
        }

        gdebug!(field, multi, "sort toggled");
        self.events.push(GridEvent::SortToggled { field, dir, multi });
        self.request(GridChanges::FIELDS);
    }

    // --- updates ---

    /// Marks work for the next update.
    pub fn request(&mut self, changes: GridChanges) {
        self.pending |= changes;
    }

    /// Returns and clears the work requested since the last call.
    pub fn take_changes(&mut self) -> GridChanges {
        core::mem::take(&mut self.pending)
    }

    /// Work requested and not yet taken.
    #[must_use]
    pub fn pending_changes(&self) -> GridChanges {
        self.pending
    }

    /// Applies `changes` and repaints. Does nothing while detached.
    pub fn apply_changes(&mut self, changes: GridChanges) -> PaintStats {
        self.pending.remove(changes);
        if !self.attached {
            return PaintStats::default();
        }
        if changes.needs_layout() && self.col_move.is_none() {
            self.relayout();
        }
        self.paint()
    }

    /// Paints the whole grid.
    pub fn paint(&mut self) -> PaintStats {
        let hover = match self.hit {
            HitState::Cell { row, field, .. } => Some(CellRef::new(row, field)),
            _ => None,
        };
        let col_move = match (self.hit, self.col_move.as_ref()) {
            (HitState::ColMoving { field, .. }, Some(live)) => Some((field, live)),
            _ => None,
        };
        let cx = PaintCx {
            config: &self.config,
            theme: &self.theme,
            fields: &self.fields,
            layout: &self.layout,
            scroll: self.viewport.scroll(),
            visible: self.viewport.visible_rows(),
            focus: self.focus,
            has_focus: self.has_focus,
            editor_open: self.editor_open,
            hover,
            col_move,
            row_move: self.row_move.as_ref(),
        };
        cx.paint(&mut self.source, &mut self.canvas)
    }

    /// Advances row-move animations and re-evaluates a row move at its
    /// fixed interval, which keeps auto-scroll going while the pointer is
    /// still.
    ///
    /// Returns `true` while the host should keep ticking.
    pub fn tick(&mut self) -> bool {
        let Some(session) = self.row_move.as_mut() else {
            return false;
        };
        let animating = session.tick();
        let due = session.take_due();
        let pointer = session.pointer();
        if animating {
            self.request(GridChanges::MOVE);
        }
        if due {
            self.move_rows_to(pointer);
        }
        true
    }

    // --- pointer input ---

    /// Handles a pointer move, `p` in grid coordinates.
    pub fn pointer_move(&mut self, p: Point, modifiers: Modifiers) -> PointerResponse {
        let _ = modifiers;
        self.pointer = Some(p);
        match self.hit {
            HitState::HeaderResizing { grab, .. } => {
                self.config.header_w = (p.x - grab).max(self.config.min_header_w);
                self.relayout();
                self.request(GridChanges::SIZE);
                PointerResponse::HANDLED
            }
            HitState::ColResizing { target, grab, .. } => {
                self.resize_to(target, grab, p);
                PointerResponse::HANDLED
            }
            HitState::ColDragging { field, grab } => {
                let direction = self.config.orientation.axis().vec(0.0, 1.0);
                if self.config.can_reorder_fields
                    && self.drag.past_deadzone(p, direction, self.config.drag_deadzone)
                {
                    self.start_col_move(field, grab);
                    self.move_col_to(p);
                }
                PointerResponse::HANDLED
            }
            HitState::ColMoving { .. } => {
                self.move_col_to(p);
                PointerResponse::HANDLED
            }
            HitState::RowDragging { row, field, grab } => {
                let direction = self.config.orientation.axis().vec(1.0, 0.0);
                if self.can_start_row_move(row)
                    && self.drag.past_deadzone(p, direction, self.config.drag_deadzone)
                {
                    self.start_row_move(row, field, grab, p);
                    self.move_rows_to(p);
                }
                PointerResponse::HANDLED
            }
            HitState::RowMoving { .. } => {
                self.move_rows_to(p);
                PointerResponse::HANDLED
            }
            _ => {
                self.rehover();
                if self.hit == HitState::None {
                    PointerResponse::IGNORED
                } else {
                    PointerResponse::HANDLED
                }
            }
        }
    }

    /// Handles a button press. Presses while a drag is active are ignored.
    pub fn pointer_down(&mut self, p: Point, modifiers: Modifiers) -> PointerResponse {
        if self.hit.is_active() {
            return PointerResponse::IGNORED;
        }
        self.pointer = Some(p);
        self.set_has_focus(true);
        let hit = self.hit_test_at(p);
        match hit {
            HitState::None => {
                self.set_hit(hit);
                // A press on empty space leaves the editor.
                self.set_editor_open(false);
                PointerResponse::IGNORED
            }
            HitState::HeaderResize { grab } => {
                self.drag.start(p);
                self.set_hit(HitState::HeaderResizing {
                    grab,
                    start_width: self.config.header_w,
                });
                PointerResponse::ACQUIRE
            }
            HitState::ColResize { target, grab } => {
                let start_width = match target {
                    ResizeTarget::Field(fi) => {
                        self.freeze = Some(ResizeFreeze {
                            widths: self.layout.fields().iter().map(|g| g.size).collect(),
                            content_width: self.layout.content().width,
                        });
                        self.fields[fi].width
                    }
                    ResizeTarget::CellWidth => self.config.cell_w,
                };
                self.drag.start(p);
                self.set_hit(HitState::ColResizing {
                    target,
                    grab,
                    start_width,
                });
                PointerResponse::ACQUIRE
            }
            HitState::Col { field, grab } => {
                self.drag.start(p);
                self.set_hit(HitState::ColDragging { field, grab });
                PointerResponse::ACQUIRE
            }
            HitState::Cell {
                row,
                field,
                indent,
                grab,
            } => {
                let shift = modifiers.contains(Modifiers::SHIFT);
                let ctrl = modifiers.intersects(Modifiers::CTRL | Modifiers::META);
                let cell = CellRef::new(row, field);
                if indent {
                    self.source.toggle_collapsed(row, shift);
                    self.events.push(GridEvent::ToggleCollapsed {
                        row,
                        recursive: shift,
                    });
                    self.rows_changed();
                }
                let already_on_it = self.focus == Some(cell);
                self.set_focus(Some(cell));
                let enter_edit = !indent
                    && !ctrl
                    && !shift
                    && (self.config.enter_edit_on_click
                        || (self.config.enter_edit_on_click_focused && already_on_it));
                if enter_edit {
                    self.open_editor(cell);
                }
                self.drag.start(p);
                self.set_hit(HitState::RowDragging { row, field, grab });
                PointerResponse::ACQUIRE
            }
            _ => PointerResponse::IGNORED,
        }
    }

    /// Handles a button release, committing whatever drag was in progress.
    pub fn pointer_up(&mut self, p: Point, modifiers: Modifiers) -> PointerResponse {
        self.pointer = Some(p);
        let response = match self.hit {
            HitState::HeaderResizing { start_width, .. } => {
                self.set_hit(HitState::None);
                self.relayout();
                if self.config.header_w != start_width {
                    let width = self.config.header_w;
                    gdebug!(width, "header resized");
                    self.events.push(GridEvent::HeaderResized { width });
                }
                self.request(GridChanges::SIZE);
                PointerResponse::RELEASE
            }
            HitState::ColResizing { target, .. } => {
                self.set_hit(HitState::None);
                self.freeze = None;
                self.relayout();
                match target {
                    ResizeTarget::Field(field) => {
                        let width = self.fields[field].width;
                        self.source.set_field_width(field, width);
                        gdebug!(field, width, "field resized");
                        self.events.push(GridEvent::FieldResized { field, width });
                    }
                    ResizeTarget::CellWidth => {
                        let width = self.config.cell_w;
                        gdebug!(width, "cell width resized");
                        self.events.push(GridEvent::CellWidthResized { width });
                    }
                }
                self.request(GridChanges::FIELDS);
                PointerResponse::RELEASE
            }
            HitState::ColDragging { field, .. } => {
                self.set_hit(HitState::None);
                self.header_click(field, modifiers.contains(Modifiers::SHIFT));
                PointerResponse::RELEASE
            }
            HitState::ColMoving { field, .. } => {
                self.set_hit(HitState::None);
                self.commit_col_move(field);
                PointerResponse::RELEASE
            }
            HitState::RowDragging { .. } => {
                self.set_hit(HitState::None);
                PointerResponse::RELEASE
            }
            HitState::RowMoving { .. } => {
                self.set_hit(HitState::None);
                self.commit_row_move();
                PointerResponse::RELEASE
            }
            _ => PointerResponse::IGNORED,
        };
        self.drag.end();
        response
    }

    /// Handles the pointer leaving the cells; only clears a hovered cell.
    pub fn pointer_leave(&mut self) {
        if let HitState::Cell { .. } = self.hit {
            self.set_hit(HitState::None);
            self.request(GridChanges::HOVER);
        }
    }

    /// Handles a click (press and release without a drag) at `p`.
    pub fn click(&mut self, p: Point) {
        if self.hit.is_active() {
            return;
        }
        if let HitState::Cell { row, field, .. } = self.hit_test_at(p) {
            self.events.push(GridEvent::CellClick(CellRef::new(row, field)));
        }
    }

    /// Handles a double click at `p`.
    pub fn double_click(&mut self, p: Point) {
        if self.hit.is_active() {
            return;
        }
        if let HitState::Cell {
            row,
            field,
            indent: false,
            ..
        } = self.hit_test_at(p)
        {
            let cell = CellRef::new(row, field);
            self.events.push(GridEvent::CellDoubleClick(cell));
            if self.config.enter_edit_on_dblclick {
                self.set_focus(Some(cell));
                self.open_editor(cell);
            }
        }
    }

    /// Aborts any drag without committing it, for a lost pointer capture or
    /// an Escape key.
    pub fn cancel_interaction(&mut self) -> PointerResponse {
        let was_active = self.hit.is_active();
        match self.hit {
            HitState::ColResizing {
                target,
                start_width,
                ..
            } => match target {
                ResizeTarget::Field(fi) => {
                    if let Some(f) = self.fields.get_mut(fi) {
                        f.width = start_width;
                    }
                }
                ResizeTarget::CellWidth => self.config.cell_w = start_width,
            },
            HitState::HeaderResizing { start_width, .. } => self.config.header_w = start_width,
            _ => {}
        }
        self.col_move = None;
        self.row_move = None;
        self.freeze = None;
        self.drag.end();
        if was_active {
            gdebug!("interaction cancelled");
            self.set_hit(HitState::None);
            self.relayout();
            self.request(GridChanges::FIELDS | GridChanges::MOVE);
            PointerResponse::RELEASE
        } else {
            PointerResponse::IGNORED
        }
    }

    // --- internals ---

    fn relayout(&mut self) {
        self.layout = GridLayout::compute(
            &self.config,
            &self.fields,
            self.source.row_count(),
            self.container,
            self.freeze.as_ref(),
        );
        self.viewport.set_overscan(self.config.overscan);
        self.viewport.set_layout(&self.layout);
        if let Some(focus) = self.focus
            && (focus.row >= self.layout.row_count() || focus.field >= self.fields.len())
        {
            self.set_focus(None);
        }
    }

    fn hit_test_at(&self, p: Point) -> HitState {
        let source = &self.source;
        hit_test(&self.config, &self.layout, self.viewport.scroll(), p, |row| {
            (source.is_tree() && source.has_children(row)).then(|| source.row_depth(row))
        })
    }

    fn set_hit(&mut self, hit: HitState) {
        if hit.kind() != self.hit.kind() {
            gtrace!(
                from = self.hit.kind().as_str(),
                to = hit.kind().as_str(),
                "hit state changed"
            );
        }
        if hit.cell() != self.hit.cell() {
            self.request(GridChanges::HOVER);
        }
        self.hit = hit;
    }

    /// Re-resolves the hover state at the last pointer position.
    fn rehover(&mut self) {
        if self.hit.is_active() {
            return;
        }
        let hit = match self.pointer {
            Some(p) => self.hit_test_at(p),
            None => HitState::None,
        };
        self.set_hit(hit);
    }

    fn scrolled(&mut self, changed: bool) {
        if changed {
            self.request(GridChanges::SCROLL);
            self.rehover();
        }
    }

    fn set_focus(&mut self, cell: Option<CellRef>) {
        if self.focus == cell {
            return;
        }
        self.focus = cell;
        self.editor_open = false;
        self.events.push(GridEvent::FocusChanged { cell });
        self.request(GridChanges::FOCUS);
    }

    fn open_editor(&mut self, cell: CellRef) {
        self.editor_open = true;
        self.events.push(GridEvent::OpenEditor(cell));
        self.request(GridChanges::FOCUS);
    }

    fn header_click(&mut self, field: usize, shift: bool) {
        self.events.push(GridEvent::HeaderClick { field });
        let sortable = self.fields.get(field).is_some_and(|f| f.sortable);
        if self.config.can_sort_rows && sortable {
            self.toggle_sort(field, shift);
        } else if self.config.focus_cell_on_click_header && !self.is_empty() {
            let row = self.focus.map_or(0, |f| f.row);
            self.set_focus(Some(CellRef::new(row, field)));
        }
    }

    fn resize_to(&mut self, target: ResizeTarget, grab: f64, p: Point) {
        let cp = self.layout.content_point(p, self.viewport.scroll());
        match target {
            ResizeTarget::Field(fi) => {
                let Some(g) = self.layout.field(fi) else {
                    return;
                };
                let width = self.fields[fi].clamp_width(cp.x - g.offset - grab);
                self.fields[fi].width = width;
                if let Some(freeze) = self.freeze.as_mut()
                    && let Some(w) = freeze.widths.get_mut(fi)
                {
                    *w = width;
                }
            }
            ResizeTarget::CellWidth => {
                self.config.cell_w = (cp.x - grab).max(self.config.min_cell_w);
            }
        }
        self.relayout();
        self.request(GridChanges::FIELDS);
    }

    fn start_col_move(&mut self, field: usize, grab: f64) {
        let layout = &self.layout;
        let live = LiveMove::try_start(field, 1, 0..self.fields.len(), 0.0, |fi| {
            layout.field(fi).map_or(0.0, |g| g.size)
        });
        if let Ok(live) = live {
            gdebug!(field, "column move started");
            self.col_move = Some(live);
            self.set_hit(HitState::ColMoving { field, grab });
        }
    }

    fn move_col_to(&mut self, p: Point) {
        let HitState::ColMoving { grab, .. } = self.hit else {
            return;
        };
        let axis = self.config.orientation.axis();
        let cp = self.layout.content_point(p, self.viewport.scroll());
        let Some(live) = self.col_move.as_mut() else {
            return;
        };
        live.update(axis.field_main(cp) - grab);
        let start = live.moving_offset();
        let span = start..start + live.moving_size();
        let scrolled = self.viewport.scroll_to_field_span(span);
        if scrolled {
            self.request(GridChanges::SCROLL);
        }
        self.request(GridChanges::MOVE);
    }

    fn commit_col_move(&mut self, from: usize) {
        let Some(mut live) = self.col_move.take() else {
            return;
        };
        let outcome = live.stop();
        let to = outcome.final_index;
        if to != from {
            let field = self.fields.remove(from);
            self.fields.insert(to, field);
            self.source.move_field(from, to);
            if let Some(focus) = self.focus {
                let f = focus.field;
                let moved = if f == from {
                    to
                } else if from < f && f <= to {
                    f - 1
                } else if to <= f && f < from {
                    f + 1
                } else {
                    f
                };
                self.focus = Some(CellRef::new(focus.row, moved));
            }
        }
        gdebug!(from, to, "column move committed");
        self.events.push(GridEvent::FieldMoved { from, to });
        self.relayout();
        self.request(GridChanges::FIELDS | GridChanges::MOVE);
    }

    fn can_start_row_move(&self, row: usize) -> bool {
        self.focus.is_some_and(|f| f.row == row)
            && self.config.can_move_rows
            && self.source.can_move_rows()
            && !self.editor_open
    }

    fn start_row_move(&mut self, row: usize, field: usize, grab: Vec2, p: Point) {
        let grab = self.config.orientation.axis().row_main(grab.to_point());
        let session = RowMoveSession::start(
            &self.source,
            &self.config,
            row,
            field,
            grab,
            p,
            self.clock.clone(),
        );
        if let Some(session) = session {
            gdebug!(row, field, "row move started");
            self.row_move = Some(session);
            self.set_hit(HitState::RowMoving { row, field, grab });
        }
    }

    fn move_rows_to(&mut self, p: Point) {
        let HitState::RowMoving { row, .. } = self.hit else {
            return;
        };
        let axis = self.config.orientation.axis();
        let cp = self.layout.content_point(p, self.viewport.scroll());
        let Some(session) = self.row_move.as_mut() else {
            return;
        };
        session.set_pointer(p);
        session.update(&self.source, axis.row_main(cp) - session.grab());

        let mut span = session.moving_span();
        if (span.end - span.start) * 0.8 > self.viewport.client_main() {
            // The block does not fit: follow the pressed row only.
            let start = session.row_offset(row);
            span = start..start + self.layout.row_size();
        }
        if self.viewport.scroll_to_row_span(span) {
            self.request(GridChanges::SCROLL);
        }
        self.request(GridChanges::MOVE);
    }

    fn commit_row_move(&mut self) {
        let Some(mut session) = self.row_move.take() else {
            return;
        };
        let request = session.finish();
        gdebug!(
            from = request.rows.start,
            count = request.rows.len(),
            to = request.final_index,
            "row move committed"
        );
        self.source.reorder_rows(&request);
        if let Some(focus) = self.focus {
            self.focus = Some(CellRef::new(request.map_index(focus.row), focus.field));
        }
        self.events.push(GridEvent::RowsReordered(request));
        self.relayout();
        self.request(GridChanges::ROWS | GridChanges::MOVE);
    }
}

impl<K, S, C, T> Component<K, GridChanges> for Grid<S, C, T>
where
    S: GridSource,
    C: Canvas,
    T: Clock + Clone,
{
    fn update(&mut self, opts: &GridChanges, cx: &mut UpdateCx<'_, K, GridChanges>) {
        let _ = cx;
        self.apply_changes(*opts);
    }
}
