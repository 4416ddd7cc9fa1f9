/// Text editing actions (delete, change, yank).
mod editing;
/// Search and find actions.
mod find;
/// Insert mode text entry actions.
mod insert;
/// Miscellaneous utility actions.
mod misc;
/// Mode switching actions.
mod modes;
/// Motion-based actions.
mod motions;
/// Viewport scrolling actions.
mod scroll;
/// Selection manipulation actions.
mod selection_ops;
/// Text object actions.
mod text_objects;
/// Window and split management actions.
mod window;
