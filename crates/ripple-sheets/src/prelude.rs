//! Prelude module - common imports for ripple-sheets users
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellError,
    CellRef,
    CellValue,

    // Error types
    Error,

    // Coordinates
    Position,
    Result,

    // Main types
    Sheet,
    Size,
};
