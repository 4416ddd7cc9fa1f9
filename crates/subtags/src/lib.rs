//! Subtag registry for writing-system identifiers.
//!
//! This crate ships a versioned snapshot of the subtag tables (an IANA
//! language-subtag-registry extract plus ISO-639-3 mappings and
//! implicit-script data) and exposes read-only validity predicates and
//! metadata lookups over it. The snapshot is loaded exactly once into
//! immutable maps; every consumer shares the same [`SubtagRegistry`]
//! by reference, so lookups are safe from any number of threads.
//!
//! Updating the snapshot means regenerating [`data`] from a newer
//! registry dump. None of the consuming algorithms need to change when
//! that happens.

pub mod data;
mod registry;

pub use registry::{LanguageRecord, SubtagRegistry, VariantRecord};

/// Well-known subtag codes used across the platform.
pub mod well_known {
	/// Sentinel language code for languages without a standard code.
	pub const UNLISTED_LANGUAGE: &str = "qaa";
	/// Sentinel script code signalling a private-use script in the
	/// trailing private-use run.
	pub const PRIVATE_SCRIPT: &str = "Qaaa";
	/// Sentinel region code signalling a private-use region in the
	/// trailing private-use run.
	pub const PRIVATE_REGION: &str = "QM";
	/// Script code for unwritten (audio) writing systems.
	pub const UNWRITTEN_SCRIPT: &str = "Zxxx";
	/// Private-use marker for audio writing systems.
	pub const AUDIO: &str = "audio";
	/// Registered variant for IPA transcriptions.
	pub const IPA_VARIANT: &str = "fonipa";
	/// Private-use marker for phonetic IPA transcriptions.
	pub const IPA_PHONETIC: &str = "etic";
	/// Private-use marker for phonemic IPA transcriptions.
	pub const IPA_PHONEMIC: &str = "emic";
	/// Prefix of the private-use variants used to disambiguate
	/// colliding tags (`dupl0`, `dupl1`, ...).
	pub const DUPLICATE_PREFIX: &str = "dupl";
}
