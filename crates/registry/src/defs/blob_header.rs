/// Magic bytes identifying a Xeno precompiled asset blob.
pub const MAGIC: &[u8; 8] = b"XENOASST";

/// Schema version for blob format compatibility.
pub const SCHEMA_VERSION: u32 = 1;
