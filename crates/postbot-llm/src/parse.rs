//! Turn free-form model replies into typed values.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LlmError;

static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[(.*?)\]").expect("valid regex"));
static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Highest novelty (overlap) score the model may give.
pub const MAX_NOVELTY_SCORE: u8 = 5;

/// Parse the relevance reply into one boolean per title.
///
/// Accepts lowercase (`[true, false]`) and capitalised (`[True, False]`) spellings,
/// optionally quoted, with or without surrounding prose. `yes`/`no` and
/// `1`/`0` are also understood.
///
/// # Errors
///
/// Returns [`LlmError::Malformed`] if an element is not a boolean or the list
/// length differs from `expected`.
pub fn parse_relevance(raw: &str, expected: usize) -> Result<Vec<bool>, LlmError> {
    let malformed = || LlmError::Malformed {
        context: format!("relevance list of {expected}"),
        raw: raw.to_owned(),
    };

    let inner = LIST_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map_or(raw, |m| m.as_str());

    let flags = inner
        .split(',')
        .map(|token| token.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        })
        .collect::<Option<Vec<bool>>>()
        .ok_or_else(malformed)?;

    if flags.len() != expected {
        return Err(malformed());
    }
    Ok(flags)
}

/// Extract the novelty score from the model's reply.
///
/// Takes the first integer in the text and clamps it to
/// `0..=MAX_NOVELTY_SCORE`. Returns `None` when the reply has no digits.
#[must_use]
pub fn parse_novelty_score(raw: &str) -> Option<u8> {
    let digits = INTEGER_RE.find(raw)?.as_str();
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    let clamped = value.min(u64::from(MAX_NOVELTY_SCORE));
    u8::try_from(clamped).ok()
}

/// Opening and closing quote pairs models like to wrap single terms in.
const TERM_QUOTES: &[(char, char)] = &[
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
    ('\u{2018}', '\u{2019}'),
    ('\u{201C}', '\u{201D}'),
];

/// Strip whitespace and wrapping quotes from a generated term.
///
/// Only a matching pair that wraps the whole term is removed, so a stoic quote
/// such as `'Amor fati' - Nietzsche` keeps its inner quoting.
#[must_use]
pub fn clean_term(raw: &str) -> String {
    let mut term = raw.trim();
    loop {
        let mut chars = term.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if TERM_QUOTES.contains(&(first, last)) => {
                let inner = &term[first.len_utf8()..term.len() - last.len_utf8()];
                if !wraps_whole(inner, first, last) {
                    break;
                }
                term = inner.trim();
            }
            _ => break,
        }
    }
    term.to_owned()
}

/// False when `inner` closes the opening quote and opens another one, as in
/// `'Amor fati' and 'memento mori'`.
fn wraps_whole(inner: &str, open: char, close: char) -> bool {
    let chars: Vec<char> = inner.chars().collect();
    !chars.windows(2).any(|pair| {
        (pair[0] == close && pair[1].is_whitespace()) || (pair[0].is_whitespace() && pair[1] == open)
    })
}

/// Normalise a generated tweet: drop double quotes and trim.
#[must_use]
pub fn clean_tweet(raw: &str) -> String {
    raw.replace('"', "").trim().to_owned()
}
