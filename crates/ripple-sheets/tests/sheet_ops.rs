//! Grid-level behavior: storage, text handling, printable area, printing

use pretty_assertions::assert_eq;
use ripple_sheets::prelude::*;

fn pos(s: &str) -> Position {
    Position::parse(s)
}

#[test]
fn empty_sheet() {
    let sheet = Sheet::new();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
    assert!(sheet.get_cell(pos("A1")).is_none());

    let mut out = Vec::new();
    sheet.print_values(&mut out).unwrap();
    assert_eq!(out, b"");
}

#[test]
fn invalid_position_is_rejected() {
    let mut sheet = Sheet::new();

    let err = sheet.set_cell(Position::NONE, "x").unwrap_err();
    assert!(matches!(err, Error::InvalidPosition(_)));

    let err = sheet.set_cell(Position::new(-1, 0), "x").unwrap_err();
    assert!(matches!(err, Error::InvalidPosition(_)));

    let err = sheet.clear_cell(Position::new(0, 20_000)).unwrap_err();
    assert!(matches!(err, Error::InvalidPosition(_)));

    assert!(sheet.get_cell(Position::NONE).is_none());
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn plain_text() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "hello").unwrap();

    let a1 = sheet.get_cell(pos("A1")).unwrap();
    assert_eq!(a1.text(), "hello");
    assert_eq!(a1.value(), CellValue::text("hello"));
    assert!(a1.referenced_cells().is_empty());
}

#[test]
fn escape_marker_is_stripped_for_values_only() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'=1+2").unwrap();

    let a1 = sheet.get_cell(pos("A1")).unwrap();
    assert_eq!(a1.text(), "'=1+2");
    assert_eq!(a1.value(), CellValue::text("=1+2"));

    // A lone '=' is plain text, not a formula
    sheet.set_cell(pos("A2"), "=").unwrap();
    let a2 = sheet.get_cell(pos("A2")).unwrap();
    assert_eq!(a2.text(), "=");
    assert_eq!(a2.value(), CellValue::text("="));
}

#[test]
fn setting_empty_text_empties_the_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B2"), "x").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(2, 2));

    sheet.set_cell(pos("B2"), "").unwrap();
    assert!(sheet.get_cell(pos("B2")).is_none());
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn clear_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("C3"), "x").unwrap();
    sheet.clear_cell(pos("C3")).unwrap();

    assert!(sheet.get_cell(pos("C3")).is_none());
    assert_eq!(sheet.printable_size(), Size::new(0, 0));

    // Clearing a never-written cell is a no-op
    sheet.clear_cell(pos("Z99")).unwrap();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn printable_size_tracks_highest_nonempty_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("C1"), "x").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(1, 3));

    sheet.set_cell(pos("A5"), "y").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(5, 3));

    // Emptying the far cell shrinks the box again
    sheet.set_cell(pos("A5"), "").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(1, 3));
}

#[test]
fn print_texts_and_values() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("C1"), "hi").unwrap();
    sheet.set_cell(pos("B2"), "=1/2").unwrap();

    let mut texts = Vec::new();
    sheet.print_texts(&mut texts).unwrap();
    assert_eq!(String::from_utf8(texts).unwrap(), "1\t\thi\n\t=1/2\t\n");

    let mut values = Vec::new();
    sheet.print_values(&mut values).unwrap();
    assert_eq!(String::from_utf8(values).unwrap(), "1\t\thi\n\t0.5\t\n");
}

#[test]
fn print_renders_errors_with_fixed_tokens() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1/0").unwrap();

    let mut values = Vec::new();
    sheet.print_values(&mut values).unwrap();
    assert_eq!(String::from_utf8(values).unwrap(), "#DIV/0!\n");
}
