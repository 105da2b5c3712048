//! Cleans raw device or OS text so it can be shown to the user.

use super::raw::RawResult;

/// Shown when there is no raw text at all.
pub const SANITIZE_FALLBACK: &str = "Unknown error occurred! Try again.";

const LEADING_PREFIX: &str = "error: ";
const NOISE: [&str; 2] = ["error:", "stat failed:"];

/// Sanitizes a single raw message. `None` yields [`SANITIZE_FALLBACK`].
pub fn sanitize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return SANITIZE_FALLBACK.to_string();
    };

    let stripped = text.strip_prefix(LEADING_PREFIX).unwrap_or(text).trim();

    // One pass per fragment; text joined up by a removal stays as it is
    let cleaned = NOISE
        .iter()
        .fold(stripped.to_string(), |acc, fragment| acc.replace(*fragment, ""));

    capitalize_first(cleaned.trim())
}

/// Sanitizes whichever raw field carries the message: `stderr` if non-empty, else `error`.
pub fn sanitize_raw(raw: &RawResult) -> String {
    let source = match raw.stderr.as_deref() {
        Some(stderr) if !stderr.is_empty() => Some(stderr),
        _ => raw.error.as_deref(),
    };
    sanitize(source)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_returns_fallback() {
        assert_eq!(sanitize(None), SANITIZE_FALLBACK);
        assert_eq!(sanitize_raw(&RawResult::default()), SANITIZE_FALLBACK);
    }

    #[test]
    fn test_strips_leading_prefix_and_capitalizes() {
        assert_eq!(sanitize(Some("error: could not find /DCIM/a.jpg")), "Could not find /DCIM/a.jpg");
    }

    #[test]
    fn test_removes_fragments_anywhere() {
        assert_eq!(
            sanitize(Some("Get: error: stat failed: No such file or directory")),
            "Get:   No such file or directory"
        );
        assert_eq!(sanitize(Some("  stat failed: invalid path  ")), "Invalid path");
    }

    #[test]
    fn test_prefix_is_anchored() {
        // Not at the start, so only the unanchored removal applies
        assert_eq!(sanitize(Some("Delete error: partial")), "Delete  partial");
    }

    #[test]
    fn test_only_first_character_changes_case() {
        assert_eq!(sanitize(Some("no files selected. TRY again")), "No files selected. TRY again");
        assert_eq!(sanitize(Some("ärger")), "Ärger");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(sanitize(Some("")), "");
        assert_eq!(sanitize(Some("   ")), "");
        assert_eq!(sanitize(Some("error: ")), "");
    }

    #[test]
    fn test_fragments_are_removed_in_a_single_pass() {
        assert_eq!(sanitize(Some("errerror:or: disk")), "Error: disk");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "could not find /DCIM/a.jpg",
            "Get: error: No such file or directory",
            "  error:invalid path  ",
            "errerror:or: disk",
            "error:error: storage",
            "ßtraße",
            "",
            "plain",
        ];
        for sample in samples {
            assert!(!sample.starts_with("error: ") && !sample.contains("stat failed:"));
            let once = sanitize(Some(sample));
            assert_eq!(sanitize(Some(&once)), once, "sample: {:?}", sample);
        }
    }

    #[test]
    fn test_raw_prefers_non_empty_stderr() {
        let raw = RawResult::new(Some("Command failed"), Some("error: invalid path"));
        assert_eq!(sanitize_raw(&raw), "Invalid path");

        let raw = RawResult::new(Some("error: invalid path given"), Some(""));
        assert_eq!(sanitize_raw(&raw), "Invalid path given");

        let raw = RawResult::new(Some("could not find x"), None);
        assert_eq!(sanitize_raw(&raw), "Could not find x");
    }
}
