//! # Edit Session Management
//!
//! An EditSession is one user's editing view of one page. It owns the
//! in-memory tree and everything the editor tracks around it:
//!
//! - the selected node (at most one, always resolvable in the tree)
//! - the dirty flag (unsaved changes since the last successful save)
//! - undo/redo history
//! - a version counter bumped on every change
//!
//! The session never talks to storage. Persistence takes a
//! [`SaveSnapshot`], writes it, and reports back with [`EditSession::mark_saved`].

use crate::factory::NodeFactory;
use crate::mutations::{Mutation, MutationResult, SelectionChange};
use crate::node::Node;
use crate::page::Page;
use crate::tree;
use crate::undo_stack::UndoStack;
use crate::EditorError;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Single edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    page: Page,

    factory: NodeFactory,

    selected_id: Option<String>,

    dirty: bool,

    /// Increments on every change to the page
    version: u64,

    history: UndoStack,
}

/// Page state handed to persistence
#[derive(Debug, Clone)]
pub struct SaveSnapshot {
    /// Session version the snapshot was taken at
    pub version: u64,

    pub page: Page,
}

impl EditSession {
    /// Create new edit session with session-scoped ids
    pub fn new(id: impl Into<String>, page: Page) -> Self {
        let factory = NodeFactory::for_page(&page.id);
        Self::with_factory(id, page, factory)
    }

    /// Create a session with a specific node factory
    pub fn with_factory(id: impl Into<String>, page: Page, factory: NodeFactory) -> Self {
        Self {
            id: id.into(),
            page,
            factory,
            selected_id: None,
            dirty: false,
            version: 0,
            history: UndoStack::new(),
        }
    }

    pub fn with_undo_levels(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn tree(&self) -> &[Node] {
        &self.page.content
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the page has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply a mutation to the page.
    ///
    /// Mutations that change nothing leave the dirty flag, version and
    /// history alone.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        if let Mutation::DeleteComponent { node_id } = &mutation {
            if self.selection_within(node_id) {
                self.selected_id = None;
            }
        }

        let outcome = mutation.apply(&self.page, &mut self.factory)?;

        if outcome.changed {
            let previous = std::mem::replace(&mut self.page, outcome.page);
            self.history.record(previous, mutation.label());
            self.touch();
            debug!(
                session = %self.id,
                version = self.version,
                mutation = %mutation.label(),
                "applied mutation"
            );
        } else {
            debug!(session = %self.id, mutation = %mutation.label(), "mutation changed nothing");
        }

        match outcome.selection {
            SelectionChange::Select(id) => self.selected_id = Some(id),
            SelectionChange::Revalidate => self.revalidate_selection(),
            SelectionChange::Keep => {}
        }

        Ok(MutationResult {
            version: self.version,
            changed: outcome.changed,
            selected_id: self.selected_id.clone(),
        })
    }

    /// Select a node. Only ids present in the tree can be selected.
    pub fn select(&mut self, node_id: &str) -> Result<(), EditorError> {
        if !tree::contains(&self.page.content, node_id) {
            return Err(EditorError::NodeNotFound(node_id.to_string()));
        }
        self.selected_id = Some(node_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_id
            .as_deref()
            .and_then(|id| tree::find(&self.page.content, id))
    }

    /// Capture the page for saving
    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            version: self.version,
            page: self.page.clone(),
        }
    }

    /// Record a successful save of `snapshot_version`.
    ///
    /// The dirty flag only clears if nothing changed since the snapshot was
    /// taken; edits made while the save was in flight stay unsaved.
    pub fn mark_saved(&mut self, snapshot_version: u64, saved_at: DateTime<Utc>) {
        if snapshot_version == self.version {
            self.dirty = false;
            self.page.last_updated = saved_at;
        }
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self) {
        self.history.begin_batch();
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Revert the last change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.page) {
            Some(previous) => {
                self.page = previous;
                self.after_history_step();
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone change
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.page) {
            Some(next) => {
                self.page = next;
                self.after_history_step();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the change `undo` would revert (e.g. "Add Heading")
    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    fn after_history_step(&mut self) {
        self.touch();
        self.revalidate_selection();
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.version += 1;
    }

    /// Whether the selected node is `node_id` or inside its subtree
    fn selection_within(&self, node_id: &str) -> bool {
        let Some(selected) = self.selected_id.as_deref() else {
            return false;
        };
        selected == node_id
            || tree::ancestors(&self.page.content, selected)
                .iter()
                .any(|ancestor| ancestor == node_id)
    }

    fn revalidate_selection(&mut self) {
        if let Some(selected) = &self.selected_id {
            if !tree::contains(&self.page.content, selected) {
                self.selected_id = None;
            }
        }
    }
}
