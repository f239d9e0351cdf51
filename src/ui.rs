//! Progress reporting to the host.
//!
//! The host hands the build a [`Ui`]; the build opens one [`Status`] on it,
//! posts updates and a final step marker, and must release the status when
//! it is done. [`StatusGuard`] ties that release to scope exit so every
//! return path closes the status exactly once.

use std::fmt;
use std::io::{self, Write};

/// Outcome marker for a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    Error,
    Warning,
}

impl StepStatus {
    fn symbol(self) -> &'static str {
        match self {
            StepStatus::Ok => "✓",
            StepStatus::Error => "✗",
            StepStatus::Warning => "!",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Ok => write!(f, "ok"),
            StepStatus::Error => write!(f, "error"),
            StepStatus::Warning => write!(f, "warning"),
        }
    }
}

/// A live status line owned by one operation.
pub trait Status {
    /// Replace the in-progress message.
    fn update(&mut self, msg: &str);

    /// Record a finished step.
    fn step(&mut self, status: StepStatus, msg: &str);

    /// Release the status. Nothing is reported after this.
    fn close(&mut self);
}

/// Source of status lines.
pub trait Ui {
    fn status(&self) -> Box<dyn Status + '_>;
}

/// Owns a [`Status`] and closes it when dropped.
pub struct StatusGuard<'a> {
    inner: Box<dyn Status + 'a>,
}

impl<'a> StatusGuard<'a> {
    pub fn new(inner: Box<dyn Status + 'a>) -> Self {
        Self { inner }
    }

    pub fn update(&mut self, msg: &str) {
        self.inner.update(msg);
    }

    pub fn step(&mut self, status: StepStatus, msg: &str) {
        self.inner.step(status, msg);
    }
}

impl Drop for StatusGuard<'_> {
    fn drop(&mut self) {
        self.inner.close();
    }
}

/// Writes status lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl Ui for TerminalUi {
    fn status(&self) -> Box<dyn Status + '_> {
        Box::new(TerminalStatus::new(io::stderr()))
    }
}

/// Line-oriented status writer.
///
/// Updates are prefixed with `==>`; steps with their outcome symbol.
/// Multi-line step messages are indented under the first line.
pub struct TerminalStatus<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> TerminalStatus<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<W: Write> Status for TerminalStatus<W> {
    fn update(&mut self, msg: &str) {
        if self.closed {
            return;
        }
        let _ = writeln!(self.out, "==> {}", msg);
    }

    fn step(&mut self, status: StepStatus, msg: &str) {
        if self.closed {
            return;
        }
        let mut lines = msg.lines();
        let first = lines.next().unwrap_or_default();
        let _ = writeln!(self.out, " {} {}", status.symbol(), first);
        for line in lines {
            let _ = writeln!(self.out, "   {}", line);
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.out.flush();
    }
}
