//! cashbook-core
//!
//! Business logic for the cashbook: validation services, document sync,
//! view projection, and the session surface a presentation adapter drives.
//! Depends on cashbook-domain. No terminal I/O, no concrete storage backend.

pub mod category_service;
pub mod error;
pub mod prefs;
pub mod projection;
pub mod session;
pub mod store;
pub mod sync;
pub mod time;
pub mod transaction_service;
pub mod year_service;

pub use category_service::CategoryService;
pub use error::{CoreError, CoreResult, StoreError};
pub use prefs::{MemoryPreferences, PreferenceStore};
pub use projection::{filter_label, project, PageSummary, PageView, ProjectedRow, ENTRIES_PER_PAGE};
pub use session::{CashbookSession, EntryPrefill};
pub use store::{merge_document, DocumentStore, MemoryDocumentStore};
pub use sync::DocumentSync;
pub use time::{Clock, SystemClock};
pub use transaction_service::{EntryDraft, TransactionService};
pub use year_service::YearService;
