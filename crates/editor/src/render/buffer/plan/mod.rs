pub mod line_source;
#[allow(clippy::module_inception)]
pub mod plan;

pub use line_source::{LineSlice, LineSource};
pub use plan::{RowKind, ViewportPlan, WrapAccess};
