//! Denylist guard for generated commands.
//!
//! This is a footgun filter, not a sandbox: it rejects the handful of
//! outputs that are obviously destructive or malformed and lets everything
//! else through. The shell widget that consumes our stdout applies its own
//! copy of the same checks.

/// Returns false for commands the tool refuses to print.
///
/// Rejected:
/// - `rm -rf /` or `rm -rf *` anywhere in the command, any letter case
/// - any backtick (a backtick-wrapped model reply is rejected, not unwrapped)
/// - any code point below 0x20
pub fn is_safe(command: &str) -> bool {
    let lowered = command.to_lowercase();
    if lowered.contains("rm -rf /") || lowered.contains("rm -rf *") {
        return false;
    }
    if command.contains('`') {
        return false;
    }
    if command.chars().any(|c| (c as u32) < 0x20) {
        return false;
    }
    true
}
