//! Document core types.
//!
//! This module re-exports document primitives from `xeno-editor-core` so
//! editor code can continue to refer to `crate::buffer::Document`.

pub use xeno_editor_core::document::*;
