/// Logs buffer open events for debugging.
pub(super) mod log_buffer_open;
/// Logs mode change events for debugging.
pub(super) mod log_mode_change;
/// Logs option change events for debugging.
pub(super) mod log_option_change;
