//! cashbook-domain
//!
//! Pure domain models for the cashbook (Month, Transaction, Meta, Cashbook).
//! No I/O, no storage. Only data types and the in-memory ledger state.

pub mod cashbook;
pub mod meta;
pub mod month;
pub mod transaction;

pub use cashbook::*;
pub use meta::*;
pub use month::*;
pub use transaction::*;
