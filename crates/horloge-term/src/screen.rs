use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Clears the whole display and homes the cursor. Nothing is flushed.
pub fn clear(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Replaces the display contents with `lines` and flushes.
pub fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    clear(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
