//! Cell positions and printable extents

use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;

/// A cell coordinate (0-based row and column)
///
/// Positions use A1-style notation for display: column letters (A, B, ...,
/// Z, AA, ...) followed by a 1-based row number. Both components are bounded
/// by [`MAX_ROWS`]/[`MAX_COLS`]; anything outside that range is invalid.
///
/// The codec never fails loudly: [`Position::parse`] returns the
/// [`Position::NONE`] sentinel for malformed or out-of-range input, and
/// rendering an invalid position yields the empty string. Callers decide
/// whether invalidity is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: i32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: i32,
}

impl Position {
    /// The distinguished invalid position
    pub const NONE: Position = Position { row: -1, col: -1 };

    /// Create a new position (not necessarily valid)
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether this position lies within the supported grid bounds
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse A1-style notation
    ///
    /// Accepts uppercase column letters followed by a 1-based row number,
    /// nothing else. Returns [`Position::NONE`] for malformed text or for a
    /// position outside the grid bounds.
    ///
    /// # Examples
    /// ```
    /// use ripple_sheets_core::Position;
    ///
    /// assert_eq!(Position::parse("A1"), Position::new(0, 0));
    /// assert_eq!(Position::parse("AB15"), Position::new(14, 27));
    /// assert_eq!(Position::parse("a1"), Position::NONE);
    /// assert_eq!(Position::parse("A0"), Position::NONE);
    /// ```
    pub fn parse(s: &str) -> Position {
        let letters_len = s.bytes().take_while(|b| b.is_ascii_uppercase()).count();
        let (letters, digits) = s.split_at(letters_len);

        if letters.is_empty() || digits.is_empty() {
            return Position::NONE;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Position::NONE;
        }

        let col = match Self::letters_to_column(letters) {
            Some(col) => col,
            None => return Position::NONE,
        };
        let row = match digits.parse::<i64>() {
            // Rows are 1-based in display
            Ok(row) if row >= 1 && row <= MAX_ROWS as i64 => (row - 1) as i32,
            _ => return Position::NONE,
        };

        Position { row, col }
    }

    /// Format as A1-style notation; an invalid position renders empty
    pub fn to_a1_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }

        let mut result = Self::column_to_letters(self.col);
        result.push_str(&(self.row + 1).to_string());
        result
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: i32) -> String {
        let mut result = String::new();
        let mut n = col as i64 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Returns `None` for non-uppercase input or a column past [`MAX_COLS`].
    pub fn letters_to_column(letters: &str) -> Option<i32> {
        if letters.is_empty() {
            return None;
        }

        let mut col: i64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            col = col * 26 + (c as i64 - 'A' as i64 + 1);
            if col > MAX_COLS as i64 {
                return None;
            }
        }

        Some((col - 1) as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

/// The printable bounding box of a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    /// Number of rows covered by non-empty cells
    pub rows: i32,
    /// Number of columns covered by non-empty cells
    pub cols: i32,
}

impl Size {
    /// Create a new size
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }
}
