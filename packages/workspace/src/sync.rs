//! # Page Synchronizer
//!
//! Writes pages to the document store and reads them back for editing.
//!
//! Every save is one atomic batch touching both records of a page:
//!
//! ```text
//! pages/{id}           ← full Page (merge), always
//! publishedPages/{id}  ← PublicPage (set) when published
//!                      ← delete            when unpublished
//! ```
//!
//! Either both writes land or neither does, so the public record can never
//! disagree with the private record's `published` flag.

use crate::store::{DocumentStore, StoreError, WriteBatch};
use chrono::{DateTime, Utc};
use pagesmith_editor::{tree, EditSession, NodeFactory, Page};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Private page records, owner only
pub const PAGES: &str = "pages";

/// Public projections of published pages
pub const PUBLISHED_PAGES: &str = "publishedPages";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Page already exists: {0}")]
    AlreadyExists(String),

    #[error("Access denied to page {page_id}")]
    AccessDenied { page_id: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Corrupt page record {page_id}: {reason}")]
    Corrupt { page_id: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReceipt {
    pub page_id: String,
    pub saved_at: DateTime<Utc>,
    pub published: bool,
}

#[derive(Clone)]
pub struct PageSync {
    store: Arc<dyn DocumentStore>,
}

impl PageSync {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Write the private record and the matching public state in one batch
    pub async fn save(&self, page: &Page) -> Result<SaveReceipt, SyncError> {
        let saved_at = Utc::now();

        let mut record = page.clone();
        record.last_updated = saved_at;

        let mut batch = WriteBatch::new().merge(PAGES, &page.id, serde_json::to_value(&record)?);
        batch = if page.published {
            batch.set(
                PUBLISHED_PAGES,
                &page.id,
                serde_json::to_value(page.public_projection())?,
            )
        } else {
            batch.delete(PUBLISHED_PAGES, &page.id)
        };

        if let Err(e) = self.store.commit(batch).await {
            warn!(page_id = %page.id, error = %e, "save failed");
            return Err(e.into());
        }

        info!(page_id = %page.id, published = page.published, "saved page");
        Ok(SaveReceipt {
            page_id: page.id.clone(),
            saved_at,
            published: page.published,
        })
    }

    /// Save the session's current page.
    ///
    /// The session is only marked clean when the write succeeded and no edit
    /// landed while it was in flight.
    pub async fn save_session(&self, session: &mut EditSession) -> Result<SaveReceipt, SyncError> {
        let snapshot = session.snapshot();
        let receipt = self.save(&snapshot.page).await?;
        session.mark_saved(snapshot.version, receipt.saved_at);
        Ok(receipt)
    }

    /// Load a page for its owner
    pub async fn load_for_editing(&self, page_id: &str, user_id: &str) -> Result<Page, SyncError> {
        let document = self
            .store
            .get(PAGES, page_id)
            .await?
            .ok_or_else(|| SyncError::NotFound(page_id.to_string()))?;

        let page = parse_page(page_id, document)?;

        if !page.is_owned_by(user_id) {
            warn!(page_id, user_id, "refused page load for non-owner");
            return Err(SyncError::AccessDenied {
                page_id: page_id.to_string(),
            });
        }

        Ok(page)
    }

    /// Load a page and open an edit session on it
    pub async fn open_session(
        &self,
        page_id: &str,
        user_id: &str,
        session_id: impl Into<String>,
    ) -> Result<EditSession, SyncError> {
        let page = self.load_for_editing(page_id, user_id).await?;
        Ok(EditSession::new(session_id, page))
    }

    /// Create and save the starter page a new user gets
    pub async fn create_default_page(
        &self,
        page_id: &str,
        user_id: &str,
    ) -> Result<Page, SyncError> {
        if self.store.get(PAGES, page_id).await?.is_some() {
            return Err(SyncError::AlreadyExists(page_id.to_string()));
        }

        let mut factory = NodeFactory::for_page(page_id);
        let page = Page::with_welcome_content(page_id, user_id, &mut factory);

        let receipt = self.save(&page).await?;
        info!(page_id, user_id, "created default page");

        Ok(Page {
            last_updated: receipt.saved_at,
            ..page
        })
    }
}

fn parse_page(page_id: &str, document: Value) -> Result<Page, SyncError> {
    let corrupt = |reason: String| SyncError::Corrupt {
        page_id: page_id.to_string(),
        reason,
    };

    let page: Page = serde_json::from_value(document).map_err(|e| corrupt(e.to_string()))?;
    tree::validate(&page.content).map_err(|e| corrupt(e.to_string()))?;

    Ok(page)
}
