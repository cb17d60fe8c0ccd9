//! Detection of local-parts that look like they were produced by a
//! random string generator, such as `xkcdqwrt` or `8834991`.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

const MAX_CONSONANT_RUN: usize = 5;
const MAX_CONSONANT_RATIO: f64 = 4.0;
const MIN_LETTERS_FOR_RATIO: usize = 6;
const MIN_LETTERS_WITHOUT_VOWELS: usize = 5;

/// Tells whether `local_part` looks randomly generated.
///
/// Only the letters `a` to `z` are considered (case-insensitively).
/// Digits and punctuation are dropped before the analysis, but they
/// still count towards the overall length of the local part.
#[must_use]
pub fn looks_random(local_part: &str) -> bool {
    let letters = local_part
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect::<Vec<_>>();

    // mostly digits or symbols
    if letters.len() < 2 && local_part.chars().count() > 4 {
        return true;
    }

    if letters.is_empty() {
        return false;
    }

    let mut vowels = 0usize;
    let mut consonants = 0usize;
    let mut run = 0usize;
    let mut longest_run = 0usize;

    for letter in &letters {
        if VOWELS.contains(letter) {
            vowels += 1;
            run = 0;
        } else {
            consonants += 1;
            run += 1;
            longest_run = longest_run.max(run);
        }
    }

    if longest_run >= MAX_CONSONANT_RUN {
        return true;
    }

    if letters.len() >= MIN_LETTERS_FOR_RATIO
        && vowels > 0
        && ratio(consonants, vowels) > MAX_CONSONANT_RATIO
    {
        return true;
    }

    // Without vowels all letters are a single run, so the run rule
    // above already decides this while MIN_LETTERS_WITHOUT_VOWELS is
    // not below MAX_CONSONANT_RUN.
    vowels == 0 && letters.len() >= MIN_LETTERS_WITHOUT_VOWELS
}

#[allow(clippy::cast_precision_loss)]
fn ratio(a: usize, b: usize) -> f64 {
    a as f64 / b as f64
}
