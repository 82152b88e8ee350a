//! # Undo/Redo Stack
//!
//! Tracks page history and enables undo/redo.
//!
//! ## Design
//!
//! - Trees are copy-on-write, so history stores whole-page checkpoints
//!   taken before each change
//! - Undo restores the checkpoint and moves the current page to redo
//! - Redo does the reverse
//! - New changes clear the redo stack
//! - Batches record one checkpoint for several changes (one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(page.clone(), "Add Heading");
//! page = mutated_page;
//!
//! if let Some(previous) = stack.undo(&page) {
//!     page = previous;
//! }
//! ```

use crate::page::Page;

/// Page state captured before a change
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub page: Page,

    /// Label of the change this checkpoint precedes
    pub description: Option<String>,
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Checkpoints to return to (most recent last)
    undo_stack: Vec<Checkpoint>,

    /// Checkpoints undone (most recent last)
    redo_stack: Vec<Checkpoint>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch: None when not batching, Some(None) before its first change
    current_batch: Option<Option<Checkpoint>>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the page as it was before a change
    pub fn record(&mut self, before: Page, description: impl Into<String>) {
        let checkpoint = Checkpoint {
            page: before,
            description: Some(description.into()),
        };

        // Any new change invalidates the redo future, batched or not
        self.redo_stack.clear();

        match &mut self.current_batch {
            Some(batch @ None) => *batch = Some(checkpoint),
            Some(Some(_)) => {}
            None => self.push_checkpoint(checkpoint),
        }
    }

    /// Start a batch (changes until `end_batch` undo together)
    pub fn begin_batch(&mut self) {
        if self.current_batch.is_none() {
            self.current_batch = Some(None);
        }
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(Some(checkpoint)) = self.current_batch.take() {
            self.push_checkpoint(checkpoint);
        }
    }

    fn push_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.undo_stack.push(checkpoint);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
    }

    /// Step back. Returns the page to restore, or None if there is no history.
    pub fn undo(&mut self, current: &Page) -> Option<Page> {
        self.end_batch();
        let checkpoint = self.undo_stack.pop()?;

        self.redo_stack.push(Checkpoint {
            page: current.clone(),
            description: checkpoint.description.clone(),
        });

        Some(checkpoint.page)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &Page) -> Option<Page> {
        self.end_batch();
        let checkpoint = self.redo_stack.pop()?;

        self.undo_stack.push(Checkpoint {
            page: current.clone(),
            description: checkpoint.description.clone(),
        });

        Some(checkpoint.page)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || matches!(self.current_batch, Some(Some(_)))
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|checkpoint| checkpoint.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|checkpoint| checkpoint.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
