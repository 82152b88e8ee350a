//! Persistence and service plumbing for Pagesmith pages.
//!
//! The editor crate stays free of I/O; this crate connects an
//! [`EditSession`](pagesmith_editor::EditSession) to a document store and
//! to the external text and image services.

pub mod assist;
mod file_store;
mod memory_store;
mod public_view;
mod services;
mod store;
mod sync;

pub use assist::AssistError;
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use public_view::{PublicPageView, PublicView};
pub use services::{ContentGenerator, ImageStorage, ServiceError};
pub use store::{Collections, DocumentStore, StoreError, WriteBatch, WriteOp};
pub use sync::{PageSync, SaveReceipt, SyncError, PAGES, PUBLISHED_PAGES};
