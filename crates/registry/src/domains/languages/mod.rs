pub mod builtins;
pub mod link;
pub mod loader;
pub mod queries;
pub mod registry;
pub mod spec;
pub mod types;

pub use registry::LanguagesRegistry;
pub use types::{LanguageEntry, LanguageInput};
