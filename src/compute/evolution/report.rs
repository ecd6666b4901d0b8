//! Progress reporting for generation snapshots.
//!
//! Reporting never feeds back into the search; a run behaves identically
//! with [`SilentReporter`] and [`ConsoleReporter`].

use std::io::{self, Write};

use crate::schema::{BeeSnapshot, GenerationSnapshot};

/// Receives every generation snapshot as it is produced.
pub trait Reporter {
    fn report(&mut self, snapshot: &GenerationSnapshot);
}

impl<F> Reporter for F
where
    F: FnMut(&GenerationSnapshot),
{
    fn report(&mut self, snapshot: &GenerationSnapshot) {
        (*self)(snapshot)
    }
}

/// Discards all snapshots (headless runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _snapshot: &GenerationSnapshot) {}
}

/// Prints the queen and the whole sorted population every generation.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to stdout.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_snapshot(&mut self, snapshot: &GenerationSnapshot) -> io::Result<()> {
        writeln!(self.out, "\n\ngeneration {}\n", snapshot.generation)?;

        if let Some(queen) = &snapshot.queen {
            writeln!(self.out, "queen:")?;
            writeln!(self.out, "{}\n", format_bee(queen))?;
        }

        for bee in &snapshot.population {
            writeln!(self.out, "{}", format_bee(bee))?;
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, snapshot: &GenerationSnapshot) {
        if let Err(e) = self.write_snapshot(snapshot) {
            log::warn!("failed to write generation {}: {e}", snapshot.generation);
        }
    }
}

/// One display line: decoded text followed by fitness.
pub fn format_bee(bee: &BeeSnapshot) -> String {
    format!("{} ({:.3})", printable(&bee.text), bee.fitness)
}

// Control characters would garble the terminal.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}
