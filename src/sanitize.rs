//! Whitespace normalization for raw model output.

/// Collapses a raw model reply into a single-line command candidate.
///
/// Every `\n` and `\r` becomes a space, then the result is trimmed. Total
/// and idempotent; may return an empty string, which the caller treats the
/// same as an unsafe command.
pub fn clean(raw: &str) -> String {
    raw.replace(['\n', '\r'], " ").trim().to_string()
}
