pub mod command_palette;
pub mod info_popup;
pub mod rename;
pub mod search;

pub use command_palette::CommandPaletteOverlay;
pub use info_popup::InfoPopupLayer;
pub use rename::RenameOverlay;
pub use search::SearchOverlay;
