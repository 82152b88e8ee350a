//! # Page Mutations
//!
//! Semantic operations on a page, as sent by the editor UI.
//!
//! ## Mutation Semantics
//!
//! ### AddComponent
//! - Creates a fully-defaulted node and places it per [`Placement`]
//! - The new node becomes the selection
//!
//! ### MoveComponent
//! - Removes the node with its subtree and re-inserts it
//! - Dropping a node onto itself is a no-op
//! - Moving a node into its own subtree fails
//!
//! ### DeleteComponent
//! - Removes node and all descendants
//! - Unknown ids are a no-op
//!
//! ### UpdateProps
//! - Shallow merge into existing props, later keys win
//! - `numberOfColumns` resizes a Columns node
//!
//! Page metadata (name, background color, published flag) is changed by
//! its own mutations so that every edit goes through the same path.

use crate::factory::NodeFactory;
use crate::node::{ComponentType, Props};
use crate::page::Page;
use crate::tree::{self, Placement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Create a new component at a placement
    #[serde(rename_all = "camelCase")]
    AddComponent {
        component_type: ComponentType,
        #[serde(default)]
        placement: Placement,
    },

    /// Remove a component and its subtree
    #[serde(rename_all = "camelCase")]
    DeleteComponent { node_id: String },

    /// Relocate a component (drag and drop)
    #[serde(rename_all = "camelCase")]
    MoveComponent {
        node_id: String,
        #[serde(default)]
        placement: Placement,
    },

    /// Merge props into a component
    #[serde(rename_all = "camelCase")]
    UpdateProps { node_id: String, props: Props },

    /// Copy a component with fresh ids, right after the original
    #[serde(rename_all = "camelCase")]
    DuplicateComponent { node_id: String },

    RenamePage { name: String },

    SetBackgroundColor { color: String },

    SetPublished { published: bool },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unsupported component type: {0}")]
    UnsupportedComponent(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid props: {0}")]
    InvalidProps(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Page name cannot be empty")]
    EmptyPageName,
}

/// How the selection should follow a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// Leave the selection alone
    Keep,

    /// Select a node created by the mutation
    Select(String),

    /// Nodes were removed; drop the selection if it no longer resolves
    Revalidate,
}

/// Result of applying a mutation to a page
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    /// The page after the mutation
    pub page: Page,

    /// Whether content or metadata actually changed
    pub changed: bool,

    pub selection: SelectionChange,
}

impl Mutation {
    /// Apply to a page, producing a new page. The input is left untouched.
    pub fn apply(
        &self,
        page: &Page,
        factory: &mut NodeFactory,
    ) -> Result<MutationOutcome, MutationError> {
        let mut next = page.clone();
        let mut selection = SelectionChange::Keep;

        match self {
            Mutation::AddComponent { component_type, placement } => {
                let (content, id) = tree::add(&page.content, factory, *component_type, placement);
                next.content = content;
                selection = SelectionChange::Select(id);
            }

            Mutation::DeleteComponent { node_id } => {
                next.content = tree::delete(&page.content, node_id);
                selection = SelectionChange::Revalidate;
            }

            Mutation::MoveComponent { node_id, placement } => {
                next.content = tree::move_node(&page.content, node_id, placement)?;
            }

            Mutation::UpdateProps { node_id, props } => {
                next.content = tree::update_props(&page.content, node_id, props, factory)?;
            }

            Mutation::DuplicateComponent { node_id } => {
                let (content, copy) = tree::duplicate(&page.content, node_id, factory);
                next.content = content;
                if let Some(copy) = copy {
                    selection = SelectionChange::Select(copy);
                }
            }

            Mutation::RenamePage { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(MutationError::EmptyPageName);
                }
                next.page_name = name.to_string();
            }

            Mutation::SetBackgroundColor { color } => {
                next.page_background_color = color.clone();
            }

            Mutation::SetPublished { published } => {
                next.published = *published;
            }
        }

        let changed = next != *page;
        Ok(MutationOutcome {
            page: next,
            changed,
            selection,
        })
    }

    /// Short label for history entries and logs
    pub fn label(&self) -> String {
        match self {
            Mutation::AddComponent { component_type, .. } => format!("Add {}", component_type),
            Mutation::DeleteComponent { .. } => "Delete component".to_string(),
            Mutation::MoveComponent { .. } => "Move component".to_string(),
            Mutation::UpdateProps { .. } => "Edit properties".to_string(),
            Mutation::DuplicateComponent { .. } => "Duplicate component".to_string(),
            Mutation::RenamePage { .. } => "Rename page".to_string(),
            Mutation::SetBackgroundColor { .. } => "Change background".to_string(),
            Mutation::SetPublished { published: true } => "Publish".to_string(),
            Mutation::SetPublished { published: false } => "Unpublish".to_string(),
        }
    }
}

/// Result of applying a mutation through an edit session
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// Whether the page changed
    pub changed: bool,

    /// Selection after the mutation
    pub selected_id: Option<String>,
}
