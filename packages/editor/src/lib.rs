//! # Pagesmith Editor
//!
//! Core tree-editing engine for Pagesmith landing pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ drag_drop: pointer events → Mutation        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: selection, dirty flag, undo/redo   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations + tree: pure copy-on-write edits  │
//! │  - add / delete / move / update props       │
//! │  - factory builds fully-defaulted nodes     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ page: private record + public projection    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit returns a new tree, the old one stays valid
//! 2. **Content is never lost**: unresolvable drop targets append instead of failing
//! 3. **One traversal**: Section children and column children are walked the same way
//! 4. **No I/O here**: persistence lives in `pagesmith-workspace`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagesmith_editor::{EditSession, Mutation, NodeFactory, Page, Placement, ComponentType};
//!
//! let mut factory = NodeFactory::for_page("page-1");
//! let page = Page::with_welcome_content("page-1", "user-1", &mut factory);
//! let mut session = EditSession::with_factory("tab-1", page, factory);
//!
//! let section = session.tree()[0].id.clone();
//! session.apply(Mutation::AddComponent {
//!     component_type: ComponentType::Button,
//!     placement: Placement::inside(section),
//! })?;
//!
//! assert!(session.is_dirty());
//! ```

mod drag_drop;
mod errors;
mod factory;
mod id_generator;
mod mutations;
mod node;
mod page;
mod session;
pub mod tree;
mod undo_stack;

pub use drag_drop::{
    Bounds, DragController, DragPayload, DragState, DropIndicator, DropMode, DropTarget,
};
pub use errors::EditorError;
pub use factory::{NodeFactory, DEFAULT_COLUMN_COUNT, WELCOME_HEADING};
pub use id_generator::{page_seed, IdSource, SequentialIds, SessionIds};
pub use mutations::{Mutation, MutationError, MutationOutcome, MutationResult, SelectionChange};
pub use node::{Column, ComponentType, Node, NodeBody, Props, Slot, Tree};
pub use page::{Page, PublicPage, DEFAULT_BACKGROUND_COLOR, DEFAULT_PAGE_NAME};
pub use session::{EditSession, SaveSnapshot};
pub use tree::{DropPosition, Location, Placement};
pub use undo_stack::{Checkpoint, UndoStack};
