//! Path flattening for backends without nested directories
//!
//! `Math HW/unit 2/quiz 1.pdf` becomes `MathHW/unit2__quiz1.pdf`: the first
//! segment stays a folder, everything below it is joined into one file name.
//! Pure string functions, no filesystem access.

/// Characters that flat storage backends reject in names
const BLOCKED_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replacement for a segment that sanitizes down to nothing
const EMPTY_SEGMENT: &str = "_";

/// Sanitize one path segment for a flat backend
///
/// Removes all whitespace, the [`BLOCKED_CHARS`] and every occurrence of
/// `separator`, so the joined name can be split unambiguously.
pub fn sanitize_segment(segment: &str, separator: &str) -> String {
    let mut cleaned: String = segment
        .chars()
        .filter(|c| !c.is_whitespace() && !BLOCKED_CHARS.contains(c))
        .collect();

    // Removing one occurrence can splice a new one together ("_" + "__" + "_")
    if !separator.is_empty() {
        while cleaned.contains(separator) {
            cleaned = cleaned.replace(separator, "");
        }
    }

    if cleaned.is_empty() {
        EMPTY_SEGMENT.to_string()
    } else {
        cleaned
    }
}

/// Flatten a root-relative, forward-slash path into `folder/joined__name`
///
/// A single-segment path is returned as its sanitized name without a folder.
pub fn flatten_path(path: &str, separator: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| sanitize_segment(segment, separator))
        .collect();

    match segments.split_first() {
        None => String::new(),
        Some((only, [])) => only.clone(),
        Some((folder, rest)) => format!("{}/{}", folder, rest.join(separator)),
    }
}
