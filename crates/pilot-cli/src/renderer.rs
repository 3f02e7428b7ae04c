//! Terminal rendering of the markdown produced by the core.
//!
//! Rich output styles headers, bold labels, inline code (commit ids) and
//! struck-through drop markers with termimad; plain output prints the
//! markdown unchanged.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.strikeout.set_fg(Color::DarkGrey);
        skin.quote_mark.set_fg(Color::Cyan);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, markdown)?;
        out.flush()?;
        Ok(())
    }

    fn write_to(&self, out: &mut impl Write, markdown: &str) -> io::Result<()> {
        if !self.rich_enabled {
            return write!(out, "{markdown}");
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                // Keep the hashes so headers read the same as plain output.
                writeln!(out, "\x1b[34m{line}\x1b[0m")?;
            } else {
                writeln!(out, "{}", self.skin.inline(line))?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
