//! Free-text cleanup applied before anything reaches the prompt.

pub const MAX_DESTINATION_CHARS: usize = 200;

/// Characters stripped from caller-supplied text
pub const FORBIDDEN_CHARS: [char; 7] = ['<', '>', '{', '}', '[', ']', '\\'];

/// Sanitize a destination name.
///
/// Strips [`FORBIDDEN_CHARS`], trims, and truncates to [`MAX_DESTINATION_CHARS`]
/// characters. The result is a fixed point: sanitizing it again changes nothing.
pub fn sanitize_destination(input: &str) -> String {
    sanitize_text(input, MAX_DESTINATION_CHARS)
}

/// Same cleanup for interest tags.
pub fn sanitize_interest(input: &str) -> String {
    sanitize_text(input, MAX_DESTINATION_CHARS)
}

fn sanitize_text(input: &str, max_chars: usize) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();

    // truncation can expose trailing whitespace
    let truncated: String = stripped.trim().chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_forbidden_characters() {
        assert_eq!(
            sanitize_destination("  <script>Paris{}, [France]\\ "),
            "scriptParis, France"
        );
    }

    #[test]
    fn keeps_natural_language() {
        assert_eq!(
            sanitize_destination("Kyoto & Osaka, Japan (spring)"),
            "Kyoto & Osaka, Japan (spring)"
        );
    }

    #[test]
    fn truncates_to_limit_in_characters() {
        let long = "é".repeat(250);
        let sanitized = sanitize_destination(&long);
        assert_eq!(sanitized.chars().count(), MAX_DESTINATION_CHARS);
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "a <",
            " <a",
            "   Rome   ",
            "[[]]",
            "x\\ y } ",
            "",
            "\t\nReykjavík\n",
        ];
        for input in inputs {
            let once = sanitize_destination(input);
            assert_eq!(sanitize_destination(&once), once, "input: {input:?}");
        }

        let mut padded = "a".repeat(199);
        padded.push(' ');
        padded.push_str("tail");
        let once = sanitize_destination(&padded);
        assert_eq!(sanitize_destination(&once), once);
        assert!(!once.ends_with(' '));
    }

    #[test]
    fn output_never_contains_forbidden_characters() {
        let nasty: String = "<>{}[]\\".repeat(40) + "Oslo";
        let sanitized = sanitize_destination(&nasty);
        assert_eq!(sanitized, "Oslo");
        assert!(!sanitized.contains(FORBIDDEN_CHARS));
    }
}
