//! # Page Document
//!
//! A Page is the persisted unit: page metadata plus the component tree.
//!
//! Two records exist per page:
//! - **Private**: the full [`Page`], readable and writable by its owner
//! - **Public**: a [`PublicPage`] projection, present only while published
//!
//! ```text
//! Page ──(published)──→ PublicPage { pageName, content, pageBackgroundColor, userId }
//! ```

use crate::factory::NodeFactory;
use crate::node::{Node, Tree};
use crate::tree;
use crate::EditorError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NAME: &str = "My First Page";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Owner-only page record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    pub page_name: String,

    #[serde(default)]
    pub content: Tree,

    #[serde(default = "default_background")]
    pub page_background_color: String,

    #[serde(default)]
    pub published: bool,

    pub last_updated: DateTime<Utc>,

    pub user_id: String,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

/// Publicly readable subset of a published page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    pub page_name: String,
    pub content: Tree,
    pub page_background_color: String,
    pub user_id: String,
}

impl Page {
    /// Empty page
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page_name: DEFAULT_PAGE_NAME.to_string(),
            content: Vec::new(),
            page_background_color: default_background(),
            published: false,
            last_updated: Utc::now(),
            user_id: user_id.into(),
        }
    }

    /// Page created at signup: one Section with a heading, text and button
    pub fn with_welcome_content(
        id: impl Into<String>,
        user_id: impl Into<String>,
        factory: &mut NodeFactory,
    ) -> Self {
        let mut page = Self::new(id, user_id);
        page.content = factory.welcome_content();
        page
    }

    /// Parse a page record and check its tree invariants
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let page: Page = serde_json::from_str(json)?;
        tree::validate(&page.content)?;
        Ok(page)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn find(&self, node_id: &str) -> Option<&Node> {
        tree::find(&self.content, node_id)
    }

    /// Public subset of this page
    pub fn public_projection(&self) -> PublicPage {
        PublicPage {
            page_name: self.page_name.clone(),
            content: self.content.clone(),
            page_background_color: self.page_background_color.clone(),
            user_id: self.user_id.clone(),
        }
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.content.iter().map(Node::subtree_len).sum()
    }
}
