//! Runtime initialization and seeding.
//!
//! This module handles copying the embedded query files and themes to the user's
//! runtime directory (`~/.local/share/evildoer/`) on first use.

use std::path::Path;
use std::{fs, io};

use include_dir::{Dir, include_dir};

use crate::grammar::runtime_dir;

/// Embedded query files from `runtime/language/queries/`.
static QUERIES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../runtime/language/queries");

/// Embedded theme files from `runtime/themes/`.
static THEMES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../runtime/themes");

/// Ensures the runtime directory exists and is populated with query files and themes.
///
/// This should be called once during editor startup. It copies the embedded
/// query files to `~/.local/share/evildoer/queries/` and themes to
/// `~/.local/share/evildoer/themes/` if they don't already exist.
pub fn ensure_runtime() -> io::Result<()> {
	let runtime = runtime_dir();

	// Seed query files
	let queries_dir = runtime.join("queries");
	if !queries_dir.exists() {
		log::info!("Seeding runtime queries to {}", queries_dir.display());
		seed_queries(&queries_dir)?;
	}

	// Seed theme files
	let themes_dir = runtime.join("themes");
	if !themes_dir.exists() {
		log::info!("Seeding runtime themes to {}", themes_dir.display());
		seed_themes(&themes_dir)?;
	}

	Ok(())
}

/// Copies embedded query files to the target directory.
fn seed_queries(target: &Path) -> io::Result<()> {
	extract_dir(&QUERIES_DIR, target)
}

/// Copies embedded theme files to the target directory.
fn seed_themes(target: &Path) -> io::Result<()> {
	extract_dir(&THEMES_DIR, target)
}

fn extract_dir(dir: &Dir<'_>, target: &Path) -> io::Result<()> {
	fs::create_dir_all(target)?;

	for file in dir.files() {
		let dest = target.join(file.path().file_name().unwrap());
		fs::write(&dest, file.contents())?;
	}

	for subdir in dir.dirs() {
		let subdir_name = subdir.path().file_name().unwrap();
		extract_dir(subdir, &target.join(subdir_name))?;
	}

	Ok(())
}

/// Forces re-seeding of runtime files, overwriting existing ones.
pub fn reseed_runtime() -> io::Result<()> {
	let runtime = runtime_dir();

	// Re-seed queries
	let queries_dir = runtime.join("queries");
	if queries_dir.exists() {
		fs::remove_dir_all(&queries_dir)?;
	}
	log::info!("Re-seeding runtime queries to {}", queries_dir.display());
	seed_queries(&queries_dir)?;

	// Re-seed themes
	let themes_dir = runtime.join("themes");
	if themes_dir.exists() {
		fs::remove_dir_all(&themes_dir)?;
	}
	log::info!("Re-seeding runtime themes to {}", themes_dir.display());
	seed_themes(&themes_dir)?;

	Ok(())
}
