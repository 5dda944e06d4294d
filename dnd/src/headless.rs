//! Headless mode for the sheet viewer.
//!
//! Paints the sheet off-screen and writes it as plain text, one line per row,
//! so it can be piped or diffed without a terminal.

use std::io::{self, Write};

use dnd_core::sheet::RegionTree;

use crate::ui::theme::SheetTheme;
use crate::ui::widgets::{buffer_lines, paint_sheet};

/// Write the painted sheet to `out`
pub fn print_sheet(tree: &RegionTree, theme: &SheetTheme, out: &mut impl Write) -> io::Result<()> {
    let canvas = paint_sheet(tree, theme);
    for line in buffer_lines(&canvas) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
