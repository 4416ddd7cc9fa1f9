//! Editor context types and result handlers.
//!
//! Re-exports from [`xeno_registry::actions::editor_ctx`] plus
//! result handlers for [`ActionResult`](crate::ActionResult) variants.

pub mod result_handlers;

pub use xeno_registry::actions::editor_ctx::*;
