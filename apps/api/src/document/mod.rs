// Document lifecycle: schema reconciliation of stored payloads, import validation,
// section reordering and the pure editor operations that replace the Document.

pub mod editor;
pub mod handlers;
pub mod import;
pub mod merge;
pub mod section_order;

pub use merge::merge;
