//! Symbols and markers for drawing various widgets.

pub use marker::{DOT, Marker};

/// Bar symbols.
pub mod bar;
/// Block symbols.
pub mod block;
/// Border symbols.
pub mod border;
/// Braille symbols.
pub mod braille;
/// Half-block symbols.
pub mod half_block;
/// Line symbols.
pub mod line;
/// Marker symbols.
pub mod marker;
/// Merge strategies.
pub mod merge;
/// Pixel symbols.
pub mod pixel;
/// Scrollbar symbols.
pub mod scrollbar;
/// Shade symbols.
pub mod shade;
