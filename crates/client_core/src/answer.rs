use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds a name or a guess into the comparable form: lowercase ASCII letters and digits only,
/// with accents decomposed and their marks dropped.
pub fn normalize_answer(raw: &str) -> String {
    raw.to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Symmetric; an empty normalized form never matches.
pub fn answers_match(expected: &str, guess: &str) -> bool {
    let expected = normalize_answer(expected);
    !expected.is_empty() && expected == normalize_answer(guess)
}
