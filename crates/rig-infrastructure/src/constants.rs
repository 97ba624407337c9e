//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rig.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rig";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "RIG";

/// Separator between the prefix and nested keys (e.g. `RIG__LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "RIG_LOG";

/// File stem used for rolled log files
pub const DEFAULT_LOG_FILE_STEM: &str = "rig";

// ============================================================================
// RESOURCE CONSTANTS
// ============================================================================

/// Directories searched for test resources, relative to the base path
pub const DEFAULT_RESOURCE_SEARCH_DIRS: &[&str] = &["tests/resources", "resources"];

/// Environment variable Cargo sets to the package directory
pub const MANIFEST_DIR_ENV: &str = "CARGO_MANIFEST_DIR";

// ============================================================================
// BUILT-IN FEATURE CONSTANTS
// ============================================================================

/// Registry name of the tracing feature
pub const TRACING_FEATURE_NAME: &str = "tracing";

/// Registry name of the workspace feature
pub const WORKSPACE_FEATURE_NAME: &str = "workspace";

/// Prefix of temporary workspace directories
pub const WORKSPACE_DIR_PREFIX: &str = "rig-workspace-";
