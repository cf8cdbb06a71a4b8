use tracing::trace;

/// Single-slot clipboard. Linewise content holds whole lines; charwise content
/// holds one run of characters in `lines[0]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YankBuffer {
    lines: Vec<Vec<char>>,
    linewise: bool,
}

impl YankBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lines(&mut self, lines: Vec<Vec<char>>) {
        trace!(target: "state.yank", lines = lines.len(), "yank_linewise");
        self.lines = lines;
        self.linewise = true;
    }

    pub fn record_chars(&mut self, run: Vec<char>) {
        trace!(target: "state.yank", chars = run.len(), "yank_charwise");
        self.lines = vec![run];
        self.linewise = false;
    }

    /// Nothing to paste. A charwise yank of zero characters counts as empty.
    pub fn is_empty(&self) -> bool {
        match self.lines.as_slice() {
            [] => true,
            [only] => !self.linewise && only.is_empty(),
            _ => false,
        }
    }

    pub fn is_linewise(&self) -> bool {
        self.linewise
    }

    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    /// Contents as text, lines joined by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }
}
