//! Deterministic archive-filename derivation.
//!
//! The output filename is a pure function of the course identifier and the
//! course's display name; a re-run computes the same name, which lets a
//! plain existence check serve as the idempotence marker.

/// Normalizes a course display name for use in a filename.
///
/// Lowercases, keeps only alphanumeric characters and spaces, and trims
/// trailing whitespace. Lowercasing happens first: it can emit combining
/// marks the filter must see, and that order makes the function a no-op on
/// its own output.
#[must_use]
pub fn sanitize_course_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Target filename for a course archive: `"<id> - <sanitized name>.zip"`.
#[must_use]
pub fn archive_filename(course_id: &str, course_name: &str) -> String {
    let name = sanitize_course_name(course_name);
    format!("{course_id} - {name}.zip")
}
