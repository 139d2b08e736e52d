use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Raw-mode terminal that presents surfaces with diffed output.
pub struct Terminal {
    stdout: io::Stdout,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            stdout,
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Write the cells of `buffer` that changed since the last call.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<()> {
        if buffer.width() != self.previous_buffer.width()
            || buffer.height() != self.previous_buffer.height()
        {
            // Force a full repaint against a blank frame.
            self.previous_buffer = Buffer::new(buffer.width(), buffer.height());
            self.previous_buffer.fill(self.previous_buffer.area(), Rgb::new(1, 1, 1));
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.flush_diff(buffer)?;
        self.previous_buffer = buffer.clone();
        Ok(())
    }

    fn flush_diff(&mut self, buffer: &Buffer) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut last_style = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in buffer.diff(&self.previous_buffer) {
            // The wide char already occupies this space
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_ct(cell.fg)))?;
                last_fg = Some(cell.fg);
            }

            if last_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_ct(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            queue_style_change(&mut self.stdout, last_style, cell.style)?;
            last_style = cell.style;

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// Emit only the attribute changes between two text styles.
fn queue_style_change(out: &mut impl Write, from: TextStyle, to: TextStyle) -> io::Result<()> {
    if to.bold != from.bold {
        let attr = if to.bold { Attribute::Bold } else { Attribute::NormalIntensity };
        queue!(out, SetAttribute(attr))?;
    }
    if to.underline != from.underline {
        let attr = if to.underline { Attribute::Underlined } else { Attribute::NoUnderline };
        queue!(out, SetAttribute(attr))?;
    }
    Ok(())
}

fn to_ct(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            DisableBracketedPaste,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
