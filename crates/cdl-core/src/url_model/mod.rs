//! Output filename derivation from the URL path.

mod path;

pub use path::last_path_segment;

/// Default filename when the URL path yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

/// Derives the Output File name from the final segment of the URL path.
///
/// Query string and fragment are ignored. Characters that cannot appear in a
/// Linux filename are replaced with `_`, leading and trailing dots and spaces
/// are stripped, and the result is capped at 255 bytes. Falls back to
/// `download.bin`.
///
/// # Examples
///
/// - `output_filename("https://example.com/archive.zip")` → `"archive.zip"`
/// - `output_filename("https://example.com/")` → `"download.bin"`
pub fn output_filename(url: &str) -> String {
    let sanitized = last_path_segment(url)
        .map(|s| sanitize(&s))
        .unwrap_or_default();
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == '.' || c == ' ');

    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
