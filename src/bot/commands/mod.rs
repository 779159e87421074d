//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Product catalog management and reporting commands
pub mod product;

/// Transaction recording and ledger query commands
pub mod transaction;

// Export commands
pub use general::*;
pub use product::*;
pub use transaction::*;
