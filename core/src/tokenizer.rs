use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[A-Za-z]+").expect("valid regex");
}

/// Case-fold an alphabetic token. `normalize(normalize(w)) == normalize(w)`.
pub fn normalize(token: &str) -> String { token.to_ascii_lowercase() }

/// A stored word: non-empty and lowercase ASCII letters only.
pub fn is_word(s: &str) -> bool { !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase()) }

/// Non-empty and ASCII letters only, in any case.
pub fn is_alphabetic(s: &str) -> bool { !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic()) }

/// Split text into normalized words: maximal runs of ASCII letters, lowercased.
/// Everything else (digits, punctuation, markup, non-ASCII) separates words.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    RE.find_iter(text).map(|m| normalize(m.as_str()))
}
