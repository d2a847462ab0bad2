use std::fmt;

use easel_core::command::ElementKind;

/// Counts of items successfully created during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    frames: usize,
    shapes: usize,
    stickies: usize,
    connectors: usize,
    texts: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successfully created item of `kind`.
    pub fn record(&mut self, kind: ElementKind) {
        *self.counter_mut(kind) += 1;
    }

    /// Returns how many items of `kind` were created.
    pub fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Frame => self.frames,
            ElementKind::Shape => self.shapes,
            ElementKind::Sticky => self.stickies,
            ElementKind::Connector => self.connectors,
            ElementKind::Text => self.texts,
        }
    }

    /// Returns the number of items created across all kinds.
    pub fn total(&self) -> usize {
        self.frames + self.shapes + self.stickies + self.connectors + self.texts
    }

    fn counter_mut(&mut self, kind: ElementKind) -> &mut usize {
        match kind {
            ElementKind::Frame => &mut self.frames,
            ElementKind::Shape => &mut self.shapes,
            ElementKind::Sticky => &mut self.stickies,
            ElementKind::Connector => &mut self.connectors,
            ElementKind::Text => &mut self.texts,
        }
    }
}

impl fmt::Display for RunStats {
    /// Lists every non-zero counter followed by the total.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counters = [
            ("frames", self.frames),
            ("shapes", self.shapes),
            ("stickies", self.stickies),
            ("connectors", self.connectors),
            ("texts", self.texts),
        ];

        writeln!(f, "Created items:")?;
        for (label, count) in counters.iter().filter(|(_, count)| *count > 0) {
            writeln!(f, "  {label}: {count}")?;
        }
        write!(f, "  total: {}", self.total())
    }
}
