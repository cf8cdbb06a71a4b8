use core_text::{Cursor, Document};
use tracing::trace;

/// Maximum number of snapshots retained on each stack.
pub const UNDO_HISTORY_MAX: usize = 100;

/// Full copy of the document lines and cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSnapshot {
    pub lines: Vec<Vec<char>>,
    pub cursor: Cursor,
}

impl EditSnapshot {
    fn capture(doc: &Document) -> Self {
        Self {
            lines: doc.lines().to_vec(),
            cursor: doc.cursor(),
        }
    }
}

/// Undo/redo stacks plus the insert coalescing flag.
///
/// A run of plain character inserts pushes one snapshot (before the first
/// insert). Every other edit force-pushes and ends the run. Pushing a new
/// snapshot always clears the redo stack.
#[derive(Debug, Clone)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    insert_run: bool,
    limit: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX)
    }
}

impl UndoEngine {
    /// `limit` is clamped to `1..=UNDO_HISTORY_MAX`.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: false,
            limit: limit.clamp(1, UNDO_HISTORY_MAX),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run_active(&self) -> bool {
        self.insert_run
    }
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Force-push the pre-edit state and end any insert run.
    pub fn push_snapshot(&mut self, doc: &Document) {
        self.insert_run = false;
        self.push(EditSnapshot::capture(doc));
    }

    fn push(&mut self, snap: EditSnapshot) {
        let lines = snap.lines.len();
        self.undo_stack.push(snap);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), lines, "push_snapshot");
        if self.undo_stack.len() > self.limit {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Snapshot before a plain character insert; only the first insert of a
    /// run pushes.
    pub fn begin_insert_coalescing(&mut self, doc: &Document) {
        if !self.insert_run {
            self.push(EditSnapshot::capture(doc));
            self.insert_run = true;
        }
    }

    pub fn end_insert_coalescing(&mut self) {
        self.insert_run = false;
    }

    /// Restore the previous snapshot; the current state moves to the redo stack.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Self::bounded_push(&mut self.redo_stack, EditSnapshot::capture(doc), self.limit);
        doc.restore(last.lines, last.cursor);
        self.insert_run = false;
        true
    }

    pub fn redo(&mut self, doc: &mut Document) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        Self::bounded_push(&mut self.undo_stack, EditSnapshot::capture(doc), self.limit);
        doc.restore(next.lines, next.cursor);
        self.insert_run = false;
        true
    }

    fn bounded_push(stack: &mut Vec<EditSnapshot>, snap: EditSnapshot, limit: usize) {
        stack.push(snap);
        if stack.len() > limit {
            let _ = stack.remove(0);
        }
    }

    /// Drop all history (new document loaded).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.insert_run = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::ColumnRule;
    use pretty_assertions::assert_eq;

    #[test]
    fn coalesced_inserts_push_once() {
        let mut doc = Document::new();
        let mut undo = UndoEngine::default();
        for ch in ['a', 'b', 'c'] {
            undo.begin_insert_coalescing(&doc);
            doc.insert_char(ch);
        }
        assert_eq!(undo.undo_depth(), 1);
        assert!(undo.undo(&mut doc));
        assert_eq!(doc.text(), "");
        assert!(!undo.insert_run_active());
    }

    #[test]
    fn forced_push_ends_run() {
        let mut doc = Document::new();
        let mut undo = UndoEngine::default();
        undo.begin_insert_coalescing(&doc);
        doc.insert_char('a');
        undo.push_snapshot(&doc);
        doc.split_line(false);
        undo.begin_insert_coalescing(&doc);
        doc.insert_char('b');
        assert_eq!(undo.undo_depth(), 3);
    }

    #[test]
    fn new_push_clears_redo() {
        let mut doc = Document::from_text("x");
        let mut undo = UndoEngine::default();
        undo.push_snapshot(&doc);
        doc.insert_char('y');
        assert!(undo.undo(&mut doc));
        assert_eq!(undo.redo_depth(), 1);
        undo.push_snapshot(&doc);
        assert_eq!(undo.redo_depth(), 0);
    }

    #[test]
    fn undo_redo_restore_text_and_cursor() {
        let mut doc = Document::from_text("hello");
        doc.set_cursor(Cursor::new(1, 5), ColumnRule::Gap);
        let mut undo = UndoEngine::default();
        undo.push_snapshot(&doc);
        doc.insert_char('!');
        let after = (doc.text(), doc.cursor());
        assert!(undo.undo(&mut doc));
        assert_eq!((doc.text(), doc.cursor()), ("hello".to_string(), Cursor::new(1, 5)));
        assert!(undo.redo(&mut doc));
        assert_eq!((doc.text(), doc.cursor()), after);
        assert!(!undo.redo(&mut doc));
    }

    #[test]
    fn stacks_are_capped() {
        let mut doc = Document::new();
        let mut undo = UndoEngine::new(3);
        for ch in "abcde".chars() {
            undo.push_snapshot(&doc);
            doc.insert_char(ch);
        }
        assert_eq!(undo.undo_depth(), 3);
        while undo.undo(&mut doc) {}
        assert_eq!(doc.text(), "ab");
        assert_eq!(UndoEngine::new(0).limit(), 1);
        assert_eq!(UndoEngine::new(500).limit(), UNDO_HISTORY_MAX);
    }
}
