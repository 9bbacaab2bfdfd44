//! Field helpers for structured logging

use uuid::Uuid;

/// Longest frame preview attached to a rejected-frame warning.
pub const FRAME_PREVIEW_LEN: usize = 120;

/// Generate a new session ID using UUID v4
///
/// Attached as the `session_id` span field so every event from one
/// simulator connection can be correlated.
///
/// # Examples
///
/// ```
/// use odyssey::logging::generate_session_id;
///
/// let session_id = generate_session_id();
/// assert_eq!(session_id.len(), 36);
/// ```
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Shorten an inbound frame for a log line.
///
/// Cuts on a character boundary and appends `...` when anything was removed.
///
/// # Examples
///
/// ```
/// use odyssey::logging::frame_preview;
///
/// assert_eq!(frame_preview("{\"a\":1}", 120), "{\"a\":1}");
/// assert_eq!(frame_preview("abcdef", 3), "abc...");
/// ```
pub fn frame_preview(frame: &str, max_len: usize) -> String {
    match frame.char_indices().nth(max_len) {
        None => frame.to_string(),
        Some((cut, _)) => format!("{}...", &frame[..cut]),
    }
}
