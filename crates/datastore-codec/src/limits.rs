//! Decoding limits and well-known constants.

/// Maximum depth of entities nested inside entity values.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Dataset id prefixes of the two managed storage backends.
pub const MANAGED_PREFIXES: [&str; 2] = ["s~", "e~"];

/// Reserved kind of the probe key; never present in user data.
pub const MISSING_LOOKUP_KIND: &str = "__MissingLookupKind";

/// Id of the probe key.
pub const MISSING_LOOKUP_ID: i64 = 1;
