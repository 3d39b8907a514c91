//! Host framework compatibility
//!
//! The directive is written against major version 2 of the host's
//! directive hook API. A mismatched host keeps running; the mismatch is
//! logged once at registration time, never escalated.

/// Crate version advertised to hosts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host directive API major version this crate targets
pub const SUPPORTED_HOST_MAJOR: u32 = 2;

/// Check the host framework's version string
///
/// Returns whether the host is supported. An unsupported or unparseable
/// version logs a warning and returns false; callers are free to proceed
/// anyway.
pub fn check_host_version(host_version: &str) -> bool {
    let major = host_version
        .split('.')
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok());
    if major == Some(SUPPORTED_HOST_MAJOR) {
        return true;
    }

    tracing::warn!(
        host_version,
        supported_major = SUPPORTED_HOST_MAJOR,
        "tracepoint {} only supports host API {}.x",
        VERSION,
        SUPPORTED_HOST_MAJOR
    );
    false
}
