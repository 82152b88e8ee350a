//! Read-only resolution of published pages.
//!
//! Only the `publishedPages` collection is read here. A page without a
//! public record resolves to [`PublicView::NotFound`] whether it is
//! unpublished or never existed, so the view cannot leak which is which.

use crate::store::DocumentStore;
use crate::sync::{SyncError, PUBLISHED_PAGES};
use pagesmith_editor::PublicPage;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum PublicView {
    Found(PublicPage),
    NotFound,
}

impl PublicView {
    pub fn page(&self) -> Option<&PublicPage> {
        match self {
            PublicView::Found(page) => Some(page),
            PublicView::NotFound => None,
        }
    }
}

#[derive(Clone)]
pub struct PublicPageView {
    store: Arc<dyn DocumentStore>,
}

impl PublicPageView {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Resolve the public projection of `page_id`.
    ///
    /// Store failures are returned as errors; a record that does not parse
    /// is treated as absent.
    pub async fn resolve(&self, page_id: &str) -> Result<PublicView, SyncError> {
        let Some(document) = self.store.get(PUBLISHED_PAGES, page_id).await? else {
            return Ok(PublicView::NotFound);
        };

        match serde_json::from_value::<PublicPage>(document) {
            Ok(page) => Ok(PublicView::Found(page)),
            Err(e) => {
                warn!(page_id, error = %e, "unreadable public page");
                Ok(PublicView::NotFound)
            }
        }
    }
}
