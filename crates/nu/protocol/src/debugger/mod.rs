//! Module containing the trait to instrument the engine for debugging and profiling
pub mod debugger_trait;
#[cfg(feature = "profiler")]
pub mod profiler;

pub use debugger_trait::*;
#[cfg(feature = "profiler")]
pub use profiler::*;
