// LogGrid - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Every configurable value is validated against the bounds declared here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogGrid";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogGrid";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Parsing limits
// =============================================================================

/// Default cap on the number of records held in memory from a single parse.
///
/// A parse replaces the record set wholesale, so this is also the total
/// memory bound for the table. When the cap is reached parsing stops, the
/// outcome is flagged as truncated, and a warning is logged so the user
/// knows data was dropped. At roughly 200 bytes per record this caps heap
/// usage in the low hundreds of megabytes.
pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

/// Minimum user-configurable record cap.
pub const MIN_MAX_RECORDS: usize = 1_000;

/// Maximum user-configurable record cap.
pub const ABSOLUTE_MAX_RECORDS: usize = 10_000_000;

// =============================================================================
// Display defaults
// =============================================================================

/// Cell text shown for a field that is absent from a record.
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Maximum length of a user-configured placeholder string.
/// Anything longer than a few characters defeats column alignment.
pub const MAX_PLACEHOLDER_LEN: usize = 8;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
