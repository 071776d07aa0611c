use serde::{Deserialize, Serialize};

/// A candidate news story collected from one of the news sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Short summary of the story. Empty when the source has none.
    pub description: String,
    pub url: String,
}

/// Quote characters stripped from titles before they are compared or logged.
const TITLE_QUOTES: &[char] = &['"', '\'', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Collapse text onto one line: CR/LF become spaces, then trim.
///
/// History logs store entries in this form, so anything compared against a
/// log goes through it first.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_string()
}

/// Normalise a news title for history comparison.
///
/// Removes straight and curly quotes and collapses the title onto one line,
/// so the same story fetched twice with different quoting compares equal to
/// its stored log entry.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let unquoted: String = title.chars().filter(|c| !TITLE_QUOTES.contains(c)).collect();
    single_line(&unquoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_straight_quotes() {
        assert_eq!(
            sanitize_title("OpenAI's \"new\" model"),
            "OpenAIs new model"
        );
    }

    #[test]
    fn strips_curly_quotes() {
        assert_eq!(
            sanitize_title("\u{201C}Nvidia\u{201D} isn\u{2019}t done"),
            "Nvidia isnt done"
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_title("  Apple M3 Mac Mini  "), "Apple M3 Mac Mini");
    }

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(
            sanitize_title("Nvidia ships new GPU\nfor AI training\r\n"),
            "Nvidia ships new GPU for AI training"
        );
    }

    #[test]
    fn single_line_keeps_each_break_as_a_space() {
        assert_eq!(single_line(" first\r\nsecond\n"), "first  second");
    }

    #[test]
    fn plain_title_unchanged() {
        assert_eq!(
            sanitize_title("Scikit-learn updates its API"),
            "Scikit-learn updates its API"
        );
    }
}
