//! Quote drafts rebuilt from stored leads
//!
//! The internal quote builder starts from these lines and lets the operator
//! edit them before sending.

mod draft;

pub use draft::{QuoteDraft, QuoteError, QuoteLine, QuoteLineKind};
