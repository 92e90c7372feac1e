//! Cell state: evaluation strategy, dependency edges, memoized value

use ahash::AHashSet;
use ripple_sheets_core::{CellValue, Error, Position, Result};
use ripple_sheets_formula::Formula;
use std::cell::RefCell;

/// Marker selecting formula mode in cell text
pub const FORMULA_MARKER: char = '=';

/// Marker escaping literal text that would otherwise be read as a formula
///
/// The marker is stripped for value purposes only; `text()` returns the raw
/// string including the marker.
pub const ESCAPE_MARKER: char = '\'';

/// Arena handle for a cell slot
///
/// Cells live in a `Vec` arena owned by the sheet; edges store handles
/// rather than references, so graph maintenance never borrows two cells at
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellId(pub(crate) u32);

impl CellId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The active interpretation of a cell's content
///
/// Exactly one variant is active at a time; an edit swaps the whole kind.
#[derive(Debug)]
pub(crate) enum CellKind {
    Empty,
    Literal(String),
    Formula(Formula),
}

impl CellKind {
    /// Classify raw edit text into a candidate kind
    ///
    /// A lone `=` is literal text, matching the convention that formula mode
    /// needs content after the marker. Parse failures surface as
    /// [`Error::FormulaSyntax`] before any cell state changes.
    pub(crate) fn classify(text: &str) -> Result<CellKind> {
        if text.is_empty() {
            return Ok(CellKind::Empty);
        }

        match text.strip_prefix(FORMULA_MARKER) {
            Some(body) if !body.is_empty() => Formula::parse(body)
                .map(CellKind::Formula)
                .map_err(|e| Error::FormulaSyntax(e.to_string())),
            _ => Ok(CellKind::Literal(text.to_string())),
        }
    }
}

/// A single cell slot
#[derive(Debug)]
pub(crate) struct Cell {
    /// Active evaluation strategy
    pub(crate) kind: CellKind,

    /// Cells this cell's formula reads from
    pub(crate) outgoing: AHashSet<CellId>,

    /// Cells whose formulas read from this one (reverse index of outgoing)
    pub(crate) incoming: AHashSet<CellId>,

    /// Memoized value; `RefCell` so lazy evaluation stays `&self`
    pub(crate) cache: RefCell<Option<CellValue>>,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Self {
            kind: CellKind::Empty,
            outgoing: AHashSet::new(),
            incoming: AHashSet::new(),
            cache: RefCell::new(None),
        }
    }

    /// The raw text of this cell
    ///
    /// Formulas re-render canonically, so the result may differ from the
    /// text originally passed to `set_cell`.
    pub(crate) fn text(&self) -> String {
        match &self.kind {
            CellKind::Empty => String::new(),
            CellKind::Literal(text) => text.clone(),
            CellKind::Formula(formula) => format!("{}{}", FORMULA_MARKER, formula.expression()),
        }
    }

    /// Whether this cell counts toward the printable bounding box
    pub(crate) fn has_text(&self) -> bool {
        !matches!(self.kind, CellKind::Empty)
    }

    /// Positions the active strategy reads (empty unless a formula)
    pub(crate) fn referenced_cells(&self) -> Vec<Position> {
        match &self.kind {
            CellKind::Formula(formula) => formula.referenced_cells(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn is_referenced(&self) -> bool {
        !self.incoming.is_empty()
    }
}
