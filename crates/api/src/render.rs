mod buffer;
mod completion;
mod document;
mod status;
pub mod types;

pub use buffer::{BufferRenderContext, ensure_buffer_cursor_visible};
pub use types::{RenderResult, WrapSegment, wrap_line};
