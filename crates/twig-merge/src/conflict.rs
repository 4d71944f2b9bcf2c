//! Conflict marker synthesis.

const OURS_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const THEIRS_MARKER: &[u8] = b">>>>>>>\n";

/// Content written to the working file for a conflicted path.
///
/// The current side comes first. A side that does not track the file
/// contributes nothing. Neither side gets a newline appended, so content
/// without a trailing newline runs straight into the next marker.
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>) -> Vec<u8> {
    let current = current.unwrap_or_default();
    let other = other.unwrap_or_default();
    let mut out = Vec::with_capacity(
        OURS_MARKER.len() + current.len() + SEPARATOR.len() + other.len() + THEIRS_MARKER.len(),
    );
    out.extend_from_slice(OURS_MARKER);
    out.extend_from_slice(current);
    out.extend_from_slice(SEPARATOR);
    out.extend_from_slice(other);
    out.extend_from_slice(THEIRS_MARKER);
    out
}
