//! Console output sinks.
//!
//! The writer talks to the console through [`ConsoleSink`], so the real
//! terminal can be swapped for an in-memory sink in tests (or for any other
//! destination that wants colored lines).

use std::io;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::style::{Color, Print, SetForegroundColor};

/// Destination for colored console lines.
///
/// `color` is the color the line is written in, `reset` is the color the
/// console is returned to afterwards.
pub trait ConsoleSink {
    fn write_colored_line(&mut self, color: Color, reset: Color, line: &str);
}

/// Sink backed by the process stdout.
///
/// Write failures are swallowed: a broken terminal must not take the host
/// application down with it.
#[derive(Debug, Default)]
pub struct TermConsole;

impl TermConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ConsoleSink for TermConsole {
    fn write_colored_line(&mut self, color: Color, reset: Color, line: &str) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            SetForegroundColor(color),
            Print(line),
            Print("\n"),
            SetForegroundColor(reset),
        );
    }
}

/// Sink that records lines in memory instead of printing them.
///
/// Cloning shares the underlying storage, so a test can keep one handle and
/// hand the other to a writer.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<(Color, String)>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines, oldest first.
    pub fn lines(&self) -> Vec<(Color, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_colored_line(&mut self, color: Color, _reset: Color, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((color, line.to_string()));
        }
    }
}
