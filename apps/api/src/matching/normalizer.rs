//! Text Normalizer — raw text to a space-joined sequence of lemmas.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matching::lexicon::{is_stopword, lemmatize};

/// Tokens must be strictly longer than this many chars to survive.
const MIN_TOKEN_CHARS: usize = 2;

/// Punctuation that always separates tokens. Hyphens, slashes, periods and
/// apostrophes stay inside a token.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s,;:@#$%&?!()\[\]{}<>"`]+|--+"#).expect("separator pattern"));

/// Trailing clitics split off a word (`company's` → `company` + `'s`).
static CLITIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)(n't|'s|'re|'ll|'ve|'d|'m)$").expect("clitic pattern"));

/// Lowercases, tokenizes, drops noise tokens, and lemmatizes.
///
/// A token is kept only if it is fully alphanumeric, not a stopword, not
/// purely numeric, and longer than two chars. Empty output is valid.
pub fn normalize(text: &str) -> String {
    tokenize(&text.to_lowercase())
        .into_iter()
        .filter(|token| is_content_token(token))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits lowercase text into word tokens.
///
/// Joined words such as `scikit-learn` or `ci/cd` come out whole, so the
/// alphanumeric filter drops them. Clitics are emitted as their own tokens.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for piece in SEPARATORS.split(text) {
        let word = piece.trim_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            continue;
        }
        match CLITIC.captures(word) {
            Some(caps) => tokens.extend(caps.iter().skip(1).flatten().map(|m| m.as_str())),
            None => tokens.push(word),
        }
    }
    tokens
}

fn is_content_token(token: &str) -> bool {
    token.chars().all(char::is_alphanumeric)
        && !is_stopword(token)
        && !token.chars().all(char::is_numeric)
        && token.chars().count() > MIN_TOKEN_CHARS
}
