//! TerminalRenderer: flushes the one-bit pixel buffer to a real terminal.
//!
//! Each terminal cell carries two vertically stacked pixels via the
//! half-block glyphs (`█ ▀ ▄ ␠`), so the 128x64 buffer fits in 128x32 cells
//! plus one status line. Frames are diffed against the previous one and only
//! changed runs are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use maze_raider_render::PixelBuffer;

/// Pack two stacked pixels into a half-block character.
fn pack_cell(upper: bool, lower: bool) -> char {
    match (upper, lower) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

/// Walk runs of changed cells between two equally sized char grids.
fn for_each_changed_run(
    prev: &[char],
    next: &[char],
    cols: usize,
    mut f: impl FnMut(usize, usize, &[char]) -> Result<()>,
) -> Result<()> {
    let rows = next.len() / cols;
    for y in 0..rows {
        let row_prev = &prev[y * cols..(y + 1) * cols];
        let row_next = &next[y * cols..(y + 1) * cols];
        let mut x = 0;
        while x < cols {
            if row_prev[x] == row_next[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < cols && row_prev[x] != row_next[x] {
                x += 1;
            }
            f(start, y, &row_next[start..x])?;
        }
    }
    Ok(())
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    cols: usize,
    last: Option<Vec<char>>,
    last_status: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            cols: 0,
            last: None,
            last_status: String::new(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
        self.last_status.clear();
    }

    /// Draw a frame plus a one-line status below it.
    pub fn draw(&mut self, fb: &PixelBuffer, status: &str) -> Result<()> {
        let cols = fb.width() as usize;
        let rows = (fb.height() as usize).div_ceil(2);

        let mut next = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            let y = (row * 2) as i32;
            for x in 0..cols {
                let upper = fb.get(x as i32, y).unwrap_or(false);
                let lower = fb.get(x as i32, y + 1).unwrap_or(false);
                next.push(pack_cell(upper, lower));
            }
        }

        let full = match &self.last {
            Some(last) => last.len() != next.len() || self.cols != cols,
            None => true,
        };

        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            for (row, chunk) in next.chunks(cols).enumerate() {
                self.stdout.queue(cursor::MoveTo(0, row as u16))?;
                self.stdout.queue(Print(chunk.iter().collect::<String>()))?;
            }
        } else {
            let last = self.last.as_ref().unwrap();
            let stdout = &mut self.stdout;
            for_each_changed_run(last, &next, cols, |x, y, run| {
                stdout.queue(cursor::MoveTo(x as u16, y as u16))?;
                stdout.queue(Print(run.iter().collect::<String>()))?;
                Ok(())
            })?;
        }

        if full || status != self.last_status {
            self.stdout.queue(cursor::MoveTo(0, rows as u16))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            self.stdout.queue(Print(status))?;
            self.last_status.clear();
            self.last_status.push_str(status);
        }

        self.stdout.flush()?;
        self.cols = cols;
        self.last = Some(next);
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
