//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (refused edits, bad input, storage failures)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Any failure without a more specific code.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, store, form, field).
    pub const NOT_FOUND: i32 = 3;
}

/// Tracing filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "simoly=warn";

/// Default number of forms shown by `form list`.
pub const DEFAULT_LIST_LIMIT: usize = 50;
