//! Keybinding registration system.
//!
//! Keybindings map keys to actions in different modes. This replaces
//! the hardcoded keymap arrays with an extensible registry.

mod goto;
mod insert;
mod normal;
mod view;

use linkme::distributed_slice;

use crate::Mode;
use crate::key::Key;

macro_rules! keybinding_slices {
    ($($slice:ident),+ $(,)?) => {
        $(#[distributed_slice]
        pub static $slice: [KeyBindingDef];)+
    };
}

keybinding_slices!(
	KEYBINDINGS_NORMAL,
	KEYBINDINGS_INSERT,
	KEYBINDINGS_GOTO,
	KEYBINDINGS_VIEW,
	KEYBINDINGS_MATCH,
	KEYBINDINGS_WINDOW,
	KEYBINDINGS_SPACE,
);

/// A keybinding definition that maps a key to an action in a specific mode.
#[derive(Clone, Copy)]
pub struct KeyBindingDef {
	/// The mode this binding is active in.
	pub mode: BindingMode,
	/// The key that triggers this binding.
	pub key: Key,
	/// The action to execute (by name).
	pub action: &'static str,
	/// Priority for conflict resolution (lower = higher priority).
	/// Default bindings use 100, user overrides should use lower values.
	pub priority: i16,
}

impl std::fmt::Debug for KeyBindingDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeyBindingDef")
			.field("mode", &self.mode)
			.field("key", &self.key)
			.field("action", &self.action)
			.field("priority", &self.priority)
			.finish()
	}
}

/// The mode a keybinding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
	/// Normal mode (default editing mode).
	Normal,
	/// Insert mode (text input).
	Insert,
	/// Goto mode (g prefix).
	Goto,
	/// View mode (z prefix).
	View,
	/// Match mode (m prefix).
	Match,
	/// Window mode (Ctrl+w prefix).
	Window,
	/// Space mode (space prefix).
	Space,
}

impl From<Mode> for BindingMode {
	fn from(mode: Mode) -> Self {
		match mode {
			Mode::Normal => BindingMode::Normal,
			Mode::Insert => BindingMode::Insert,
			Mode::Goto => BindingMode::Goto,
			Mode::View => BindingMode::View,
			Mode::Command { .. } => BindingMode::Normal,
			Mode::PendingAction(_) => BindingMode::Normal,
		}
	}
}

fn slice_for_mode(mode: BindingMode) -> &'static [KeyBindingDef] {
	match mode {
		BindingMode::Normal => &KEYBINDINGS_NORMAL,
		BindingMode::Insert => &KEYBINDINGS_INSERT,
		BindingMode::Goto => &KEYBINDINGS_GOTO,
		BindingMode::View => &KEYBINDINGS_VIEW,
		BindingMode::Match => &KEYBINDINGS_MATCH,
		BindingMode::Window => &KEYBINDINGS_WINDOW,
		BindingMode::Space => &KEYBINDINGS_SPACE,
	}
}

fn all_slices() -> impl Iterator<Item = &'static KeyBindingDef> {
	KEYBINDINGS_NORMAL
		.iter()
		.chain(KEYBINDINGS_INSERT.iter())
		.chain(KEYBINDINGS_GOTO.iter())
		.chain(KEYBINDINGS_VIEW.iter())
		.chain(KEYBINDINGS_MATCH.iter())
		.chain(KEYBINDINGS_WINDOW.iter())
		.chain(KEYBINDINGS_SPACE.iter())
}

/// Look up a keybinding for the given mode and key.
/// Returns the highest-priority (lowest value) binding if multiple match.
pub fn find_binding(mode: BindingMode, key: Key) -> Option<&'static KeyBindingDef> {
	slice_for_mode(mode)
		.iter()
		.filter(|kb| kb.key == key)
		.min_by_key(|kb| kb.priority)
}

/// Get all keybindings for a specific mode.
pub fn bindings_for_mode(mode: BindingMode) -> impl Iterator<Item = &'static KeyBindingDef> {
	slice_for_mode(mode).iter()
}

/// Get all keybindings for a specific action.
pub fn bindings_for_action(action: &str) -> impl Iterator<Item = &'static KeyBindingDef> {
	all_slices().filter(move |kb| kb.action == action)
}
