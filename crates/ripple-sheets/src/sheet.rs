//! The sheet: sparse cell grid plus dependency-graph maintenance
//!
//! The sheet owns every cell in a flat arena and addresses them through
//! [`CellId`] handles; the 2-D grid maps positions to handles and grows on
//! write. All graph bookkeeping (cycle checks, edge rewiring, cache
//! invalidation) lives here, keyed by handle, so no cell ever holds a
//! reference into a sibling.

use crate::cell::{Cell, CellId, CellKind, ESCAPE_MARKER};
use ahash::AHashSet;
use ripple_sheets_core::{CellValue, Error, Position, Result, Size};
use std::io::{self, Write};

/// A sparse, growable spreadsheet grid with reactive recalculation
///
/// Edits go through [`set_cell`](Sheet::set_cell) /
/// [`clear_cell`](Sheet::clear_cell); reads go through
/// [`get_cell`](Sheet::get_cell). Values are computed lazily and memoized;
/// an edit invalidates exactly the edited cell and its transitive
/// dependents.
///
/// # Example
///
/// ```rust
/// use ripple_sheets::{Position, Sheet};
///
/// let mut sheet = Sheet::new();
/// sheet.set_cell(Position::parse("B1"), "10").unwrap();
/// sheet.set_cell(Position::parse("A1"), "=B1+1").unwrap();
///
/// let a1 = sheet.get_cell(Position::parse("A1")).unwrap();
/// assert_eq!(a1.value().as_number(), Some(11.0));
/// ```
#[derive(Debug, Default)]
pub struct Sheet {
    /// All cells ever materialized; never shrinks
    arena: Vec<Cell>,
    /// Row-major position index; each row's column vector grows
    /// independently
    grid: Vec<Vec<Option<CellId>>>,
}

impl Sheet {
    /// Create a fresh, empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell's text
    ///
    /// Text starting with `=` (and at least one more character) is parsed
    /// as a formula; empty text empties the cell; anything else is stored
    /// as literal text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPosition`] for an out-of-bounds position,
    /// [`Error::FormulaSyntax`] for an unparseable formula, and
    /// [`Error::CircularDependency`] when committing the formula would
    /// create a reference cycle. In every error case the sheet's prior
    /// cell contents and edges are untouched.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(Error::InvalidPosition(pos));
        }

        let id = self.materialize(pos);
        let kind = CellKind::classify(text)?;
        let refs = match &kind {
            CellKind::Formula(formula) => formula.referenced_cells(),
            _ => Vec::new(),
        };

        if self.would_create_cycle(id, &refs) {
            log::debug!("rejecting edit at {}: would create a cycle", pos);
            return Err(Error::CircularDependency(pos));
        }

        self.commit(id, kind, &refs);
        Ok(())
    }

    /// Empty a cell
    ///
    /// Equivalent to `set_cell(pos, "")`: the strategy resets, outgoing
    /// edges are severed, and dependents are invalidated. The slot stays
    /// allocated (dependents referencing it now read zero) and the grid
    /// never shrinks.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        if !pos.is_valid() {
            return Err(Error::InvalidPosition(pos));
        }

        if let Some(id) = self.lookup_id(pos) {
            self.commit(id, CellKind::Empty, &[]);
        }
        Ok(())
    }

    /// Get a read view of the cell at `pos`
    ///
    /// Returns `None` for invalid positions, unallocated slots, and slots
    /// holding empty text - a cell materialized only as a reference target
    /// is indistinguishable from an absent one.
    pub fn get_cell(&self, pos: Position) -> Option<CellRef<'_>> {
        let id = self.lookup_id(pos)?;
        if !self.cell(id).has_text() {
            return None;
        }
        Some(CellRef { sheet: self, id })
    }

    /// The smallest bounding box covering every cell with non-empty text
    pub fn printable_size(&self) -> Size {
        let mut size = Size::default();

        for (row, cols) in self.grid.iter().enumerate() {
            // Scan from the highest column down to the last non-empty cell
            for (col, slot) in cols.iter().enumerate().rev() {
                if let Some(id) = slot {
                    if self.cell(*id).has_text() {
                        size.rows = size.rows.max(row as i32 + 1);
                        size.cols = size.cols.max(col as i32 + 1);
                        break;
                    }
                }
            }
        }

        size
    }

    /// Print evaluated values for the printable area, tab-separated
    pub fn print_values<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_cells(out, |id| self.value_of(id).to_string())
    }

    /// Print cell texts for the printable area, tab-separated
    pub fn print_texts<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_cells(out, |id| self.cell(id).text())
    }

    // === Graph maintenance ===

    /// Check whether pointing `id` at `refs` would close a cycle
    ///
    /// Walks backward from `id` over incoming edges ("who depends on me,
    /// transitively") with an explicit stack; if that walk reaches any cell
    /// the candidate references - including `id` itself, covering direct
    /// self-reference - the edit must be rejected. Runs against the current
    /// graph, before anything is committed. Positions never materialized
    /// cannot hold a formula, so only allocated slots participate.
    fn would_create_cycle(&self, id: CellId, refs: &[Position]) -> bool {
        if refs.is_empty() {
            return false;
        }

        let referenced: AHashSet<CellId> =
            refs.iter().filter_map(|&pos| self.lookup_id(pos)).collect();
        if referenced.is_empty() {
            return false;
        }

        let mut visited = AHashSet::new();
        let mut to_visit = vec![id];
        while let Some(current) = to_visit.pop() {
            if !visited.insert(current) {
                continue;
            }
            if referenced.contains(&current) {
                return true;
            }
            to_visit.extend(self.cell(current).incoming.iter().copied());
        }

        false
    }

    /// Swap in a new kind, rewire edges, and invalidate dependents
    fn commit(&mut self, id: CellId, kind: CellKind, refs: &[Position]) {
        self.cell_mut(id).kind = kind;
        self.rewire(id, refs);
        self.invalidate_from(id);
    }

    /// Point `id`'s outgoing edges at `refs`, keeping both directions in
    /// sync
    ///
    /// Referenced positions without a cell are materialized as empty ones
    /// here - a documented side effect of committing an edit, not of
    /// lookup.
    fn rewire(&mut self, id: CellId, refs: &[Position]) {
        let old_targets: Vec<CellId> = self.cell(id).outgoing.iter().copied().collect();
        for target in old_targets {
            self.cell_mut(target).incoming.remove(&id);
        }
        self.cell_mut(id).outgoing.clear();

        for &pos in refs {
            let target = self.materialize(pos);
            self.cell_mut(id).outgoing.insert(target);
            self.cell_mut(target).incoming.insert(id);
        }
    }

    /// Drop the cached value of `start` and every transitive dependent
    ///
    /// Explicit stack with a visited set, so diamond-shaped dependency
    /// graphs are invalidated once per cell and deep chains cannot blow
    /// the call stack.
    fn invalidate_from(&self, start: CellId) {
        let mut visited = AHashSet::new();
        let mut to_visit = vec![start];
        while let Some(current) = to_visit.pop() {
            if !visited.insert(current) {
                continue;
            }
            self.cell(current).cache.borrow_mut().take();
            to_visit.extend(self.cell(current).incoming.iter().copied());
        }
        log::trace!("invalidated {} cells", visited.len());
    }

    // === Evaluation ===

    /// Compute (or fetch) the value of `id`
    fn value_of(&self, id: CellId) -> CellValue {
        let cell = self.cell(id);
        if let Some(value) = cell.cache.borrow().as_ref() {
            return value.clone();
        }

        let value = match &cell.kind {
            CellKind::Empty => CellValue::default(),
            CellKind::Literal(text) => {
                CellValue::Text(text.strip_prefix(ESCAPE_MARKER).unwrap_or(text).to_string())
            }
            // The committed graph is acyclic, so this recursion terminates
            // and never re-enters the cell being computed
            CellKind::Formula(formula) => formula.evaluate(&|pos| self.lookup_value(pos)),
        };

        *cell.cache.borrow_mut() = Some(value.clone());
        value
    }

    /// Evaluation lookup: `None` for unallocated slots (reads as zero)
    fn lookup_value(&self, pos: Position) -> Option<CellValue> {
        let id = self.lookup_id(pos)?;
        Some(self.value_of(id))
    }

    // === Storage ===

    /// Get the slot at `pos`, if one was ever allocated there
    fn lookup_id(&self, pos: Position) -> Option<CellId> {
        if !pos.is_valid() {
            return None;
        }
        *self.grid.get(pos.row as usize)?.get(pos.col as usize)?
    }

    /// Get or create the slot at `pos`, growing the grid to cover it
    fn materialize(&mut self, pos: Position) -> CellId {
        let (row, col) = (pos.row as usize, pos.col as usize);

        if self.grid.len() <= row {
            self.grid.resize_with(row + 1, Vec::new);
        }
        let cols = &mut self.grid[row];
        if cols.len() <= col {
            cols.resize(col + 1, None);
        }

        if let Some(id) = cols[col] {
            return id;
        }
        let id = CellId(self.arena.len() as u32);
        self.arena.push(Cell::new());
        self.grid[row][col] = Some(id);
        id
    }

    fn cell(&self, id: CellId) -> &Cell {
        &self.arena[id.index()]
    }

    fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.arena[id.index()]
    }

    fn print_cells<W, F>(&self, out: &mut W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(CellId) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows as usize {
            for col in 0..size.cols as usize {
                if col > 0 {
                    write!(out, "\t")?;
                }
                if let Some(Some(id)) = self.grid[row].get(col) {
                    write!(out, "{}", render(*id))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// A read view of one cell
///
/// Obtained from [`Sheet::get_cell`]; borrows the sheet, so it cannot
/// outlive it or coexist with mutation.
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    sheet: &'a Sheet,
    id: CellId,
}

impl CellRef<'_> {
    /// The cell's value, computing and memoizing it if needed
    ///
    /// Repeated reads return the cached value until this cell or one of
    /// its ancestors is edited.
    pub fn value(&self) -> CellValue {
        self.sheet.value_of(self.id)
    }

    /// The cell's raw text (formulas render canonically)
    pub fn text(&self) -> String {
        self.sheet.cell(self.id).text()
    }

    /// Valid positions this cell's formula reads, deduplicated, in
    /// row-major order
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.sheet.cell(self.id).referenced_cells()
    }

    /// Whether any other cell's formula reads this one
    pub fn is_referenced(&self) -> bool {
        self.sheet.cell(self.id).is_referenced()
    }
}
