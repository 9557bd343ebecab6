use regex::Regex;
use std::sync::OnceLock;

/// Separator between paragraphs in normalized text and inside chunks
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

static CRLF: OnceLock<Regex> = OnceLock::new();
static BLANK_LINES: OnceLock<Regex> = OnceLock::new();
static HORIZONTAL_WS: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid normalization regex"))
}

/// Canonicalize raw document text before segmentation.
///
/// Line endings become LF, three or more newlines collapse to one blank line,
/// runs of spaces and tabs collapse to one space, and the document is trimmed.
/// `normalize(normalize(t)) == normalize(t)` holds for every input.
pub fn normalize(text: &str) -> String {
    // `\r+\n` rather than `\r\n`: "\r\r\n" would otherwise need two passes.
    let text = regex(&CRLF, r"\r+\n").replace_all(text, "\n");
    let text = regex(&BLANK_LINES, r"\n{3,}").replace_all(&text, PARAGRAPH_SEPARATOR);
    let text = regex(&HORIZONTAL_WS, r"[ \t]+").replace_all(&text, " ");
    text.trim().to_string()
}

/// Split normalized text into trimmed, non-empty paragraphs in document order
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_line_endings_and_whitespace() {
        let raw = "  Title\r\n\r\n\r\n\r\nFirst \t line\r\nsecond   line\n\n\n\n\nEnd\t ";
        assert_eq!(
            normalize(raw),
            "Title\n\nFirst line\nsecond line\n\nEnd"
        );
    }

    #[test]
    fn keeps_single_blank_lines() {
        assert_eq!(normalize("a\n\nb\nc"), "a\n\nb\nc");
    }

    #[test]
    fn whitespace_only_normalizes_to_empty() {
        assert_eq!(normalize(" \t\r\n\n \n"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "a\r\r\nb",
            "x \n\n\n \n\n\n y",
            "\t\tlead\n\n\n\ntrail \r\n",
            "one\r\n\r\n\r\ntwo\t\t\tthree",
            "a\rb\r\n\n\nc",
            "  \u{a0}nbsp\u{a0}  ",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn splits_on_blank_lines() {
        let paragraphs = split_paragraphs("first\npara\n\nsecond\n\n \n\nthird ");
        assert_eq!(paragraphs, vec!["first\npara", "second", "third"]);
    }

    #[test]
    fn empty_text_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n\n").is_empty());
    }
}
