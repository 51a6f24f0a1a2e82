//! Console status notifications.

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

/// Colour palette for status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Cyan,
    Yellow,
    Magenta,
    Blue,
}

impl StatusColor {
    /// The cycle status lines step through, one colour per schedule slot.
    pub const RAINBOW: [StatusColor; 5] = [
        StatusColor::Green,
        StatusColor::Cyan,
        StatusColor::Yellow,
        StatusColor::Magenta,
        StatusColor::Blue,
    ];

    pub fn for_step(step: usize) -> Self {
        Self::RAINBOW[step % Self::RAINBOW.len()]
    }
}

impl From<StatusColor> for Color {
    fn from(color: StatusColor) -> Self {
        match color {
            StatusColor::Green => Color::Green,
            StatusColor::Cyan => Color::Cyan,
            StatusColor::Yellow => Color::Yellow,
            StatusColor::Magenta => Color::Magenta,
            StatusColor::Blue => Color::Blue,
        }
    }
}

/// Receives human-readable progress messages.
///
/// Fire-and-forget: implementations must swallow their own failures rather
/// than interrupt playback.
pub trait StatusNotifier {
    fn notify(&mut self, message: &str, color: StatusColor);
}

/// Writes one coloured line per notification.
pub struct ConsoleNotifier<W: Write = Stdout> {
    out: W,
    colored: bool,
}

impl ConsoleNotifier<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out, colored: true }
    }

    /// Disable ANSI colour codes.
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, message: &str, color: StatusColor) -> io::Result<()> {
        if self.colored {
            queue!(
                self.out,
                SetForegroundColor(color.into()),
                Print(message),
                ResetColor,
                Print("\n")
            )?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()
    }
}

impl<W: Write> StatusNotifier for ConsoleNotifier<W> {
    fn notify(&mut self, message: &str, color: StatusColor) {
        if let Err(err) = self.write_line(message, color) {
            tracing::warn!("failed to write status line: {err}");
        }
    }
}

/// Sends notifications to the debug log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl StatusNotifier for SilentNotifier {
    fn notify(&mut self, message: &str, color: StatusColor) {
        tracing::debug!(?color, "{message}");
    }
}
