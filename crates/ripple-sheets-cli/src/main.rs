//! Ripple Sheets CLI - drive a sheet with a line-oriented command script

use anyhow::{bail, Context, Result};
use clap::Parser;
use ripple_sheets::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(author, version, about = "Reactive spreadsheet engine driver")]
struct Cli {
    /// Command script to run (default: stdin)
    ///
    /// One command per line: `set <POS> <TEXT>`, `clear <POS>`, `size`,
    /// `values`, `texts`. Blank lines and lines starting with `#` are
    /// skipped.
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut sheet = Sheet::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read script")?;
        if let Err(e) = run_command(&mut sheet, &mut out, &line) {
            // Keep processing; a bad edit leaves the sheet unchanged
            eprintln!("line {}: {:#}", idx + 1, e);
        }
    }

    Ok(())
}

fn run_command(sheet: &mut Sheet, out: &mut impl Write, line: &str) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    };

    match command {
        "set" => {
            let (pos, text) = match rest.split_once(char::is_whitespace) {
                Some((pos, text)) => (pos, text),
                // `set A1` with no text empties the cell
                None if !rest.is_empty() => (rest, ""),
                None => bail!("set needs a position"),
            };
            sheet
                .set_cell(parse_position(pos)?, text)
                .with_context(|| format!("set {}", pos))?;
        }
        "clear" => {
            if rest.is_empty() {
                bail!("clear needs a position");
            }
            sheet
                .clear_cell(parse_position(rest)?)
                .with_context(|| format!("clear {}", rest))?;
        }
        "size" => {
            let size = sheet.printable_size();
            writeln!(out, "{}x{}", size.rows, size.cols).context("Failed to write to stdout")?;
        }
        "values" => {
            sheet.print_values(out).context("Failed to write to stdout")?;
        }
        "texts" => {
            sheet.print_texts(out).context("Failed to write to stdout")?;
        }
        other => bail!("Unknown command '{}'", other),
    }

    Ok(())
}

fn parse_position(s: &str) -> Result<Position> {
    let pos = Position::parse(s);
    if pos == Position::NONE {
        bail!("'{}' is not a cell position", s);
    }
    Ok(pos)
}
