//! Statistical primitives shared by the crackers.
//!
//! All of the automated attacks in this crate boil down to the same idea:
//! decrypt with a candidate key and measure how English-like the output is.
//! This module holds the reference tables and the three measures used for
//! that: a chi-squared goodness-of-fit test against English letter
//! frequencies, the Index of Coincidence, and a trigram-frequency score.
//! Every function here is pure; identical inputs give identical outputs.

use crate::error::{Error, Result};

pub const ALPHABET_SIZE: usize = 26;
pub const ALPHABET: &[u8; ALPHABET_SIZE] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// IoC of typical English prose. Random text sits around 0.038.
pub const ENGLISH_IOC: f64 = 0.0667;

// English letter frequencies as percentages, A-Z.
pub const ENGLISH_FREQ: [f64; ALPHABET_SIZE] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

// Common English trigrams with relative weights, sorted so candidates can be
// looked up with a binary search.
const TRIGRAMS: &[(&[u8; 3], f64)] = &[
    (b"ALL", 0.23),
    (b"AND", 0.73),
    (b"ARE", 0.21),
    (b"BUT", 0.18),
    (b"ECT", 0.17),
    (b"ENT", 0.28),
    (b"ERE", 0.31),
    (b"ERS", 0.16),
    (b"EVE", 0.17),
    (b"FOR", 0.29),
    (b"HAT", 0.35),
    (b"HEN", 0.19),
    (b"HER", 0.36),
    (b"HES", 0.21),
    (b"HIM", 0.16),
    (b"HIS", 0.34),
    (b"ILL", 0.16),
    (b"ING", 0.72),
    (b"ION", 0.28),
    (b"ITH", 0.24),
    (b"MEN", 0.20),
    (b"NOT", 0.21),
    (b"OME", 0.18),
    (b"ONE", 0.17),
    (b"ONT", 0.20),
    (b"OUL", 0.17),
    (b"OUR", 0.19),
    (b"SAN", 0.16),
    (b"SHE", 0.18),
    (b"TER", 0.27),
    (b"THA", 0.33),
    (b"THE", 1.81),
    (b"THI", 0.22),
    (b"TIO", 0.22),
    (b"VER", 0.24),
    (b"WAS", 0.26),
    (b"WHI", 0.17),
    (b"WOU", 0.16),
    (b"YOU", 0.25),
];

// Short, frequent English words used by the XOR plaintext heuristic.
pub(crate) const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what",
];

/// Chi-squared statistic between observed counts and expected frequencies.
///
/// Lower values indicate the observed distribution is closer to the expected
/// one. The expected vector must be the same length as the observed vector
/// and strictly positive everywhere.
pub fn chi_squared(observed: &[u32], expected: &[f64]) -> Result<f64> {
    if observed.len() != expected.len() {
        return Err(Error::InvalidInput(format!(
            "frequency vectors must have the same length: observed={}, expected={}",
            observed.len(),
            expected.len()
        )));
    }
    if expected.iter().any(|&e| e == 0.0) {
        return Err(Error::InvalidInput(
            "expected frequencies cannot contain zero values".into(),
        ));
    }

    Ok(observed
        .iter()
        .zip(expected)
        .map(|(&obs, &exp)| (obs as f64 - exp).powi(2) / exp)
        .sum())
}

/// Index of Coincidence: the probability that two letters drawn at random
/// from the text are the same.
///
/// Computed with replacement as the sum of squared letter proportions, so a
/// text using every letter equally often scores 1/26 (about 0.0385) and
/// English prose sits near 0.065-0.068. Only ASCII letters are considered
/// and case is ignored; fewer than two letters is `InsufficientData`.
pub fn calculate_ioc(text: &str) -> Result<f64> {
    let (counts, total) = letter_counts(text);
    if total < 2 {
        return Err(Error::InsufficientData(format!(
            "text must contain at least 2 alphabetic characters, got {total}"
        )));
    }

    let n = total as f64;
    Ok(counts.iter().map(|&c| (c as f64 / n).powi(2)).sum())
}

/// Score text by summing the weights of known English trigrams over a
/// sliding window, normalized per window and rescaled by 100.
///
/// Higher is better. Text with fewer than three letters scores 0.
pub fn score_trigrams(text: &str) -> f64 {
    let filtered: Vec<u8> = text
        .bytes()
        .filter(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if filtered.len() < 3 {
        return 0.0;
    }

    let score: f64 = filtered
        .windows(3)
        .map(|w| {
            match TRIGRAMS.binary_search_by(|&(t, _)| t.as_slice().cmp(w)) {
                Ok(idx) => TRIGRAMS[idx].1,
                Err(_) => 0.0,
            }
        })
        .sum();

    let num_windows = (filtered.len() - 2) as f64;
    score / num_windows * 100.0
}

/// Score text against English letter frequencies with chi-squared.
///
/// Lower is better; text with no letters scores infinity so it can never win
/// a minimum-score search.
pub(crate) fn score_english(text: &str) -> f64 {
    let (counts, total) = letter_counts(text);
    if total == 0 {
        return f64::INFINITY;
    }

    let expected: Vec<f64> = ENGLISH_FREQ
        .iter()
        .map(|freq| freq / 100.0 * total as f64)
        .collect();
    chi_squared(&counts, &expected).unwrap_or(f64::INFINITY)
}

/// Per-letter counts (A-Z, case-folded) and the total letter count.
pub(crate) fn letter_counts(text: &str) -> ([u32; ALPHABET_SIZE], u32) {
    let mut counts = [0u32; ALPHABET_SIZE];
    let mut total = 0u32;
    for b in text.bytes() {
        if b.is_ascii_alphabetic() {
            counts[(b.to_ascii_uppercase() - b'A') as usize] += 1;
            total += 1;
        }
    }
    (counts, total)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn chi_squared_of_identical_distributions_is_zero() {
        let observed = [10u32, 15, 12, 8];
        let expected: Vec<f64> = observed.iter().map(|&o| o as f64).collect();

        let chi = chi_squared(&observed, &expected).unwrap();

        assert_eq!(chi, 0.0);
    }

    #[test]
    fn chi_squared_rejects_mismatched_lengths() {
        let result = chi_squared(&[1, 2, 3], &[1.0, 2.0]);

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn chi_squared_rejects_zero_expected_values() {
        let result = chi_squared(&[1, 2], &[1.0, 0.0]);

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn ioc_of_uniform_text_is_low() {
        let ioc = calculate_ioc("ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();

        assert!(ioc > 0.035 && ioc < 0.042, "got {ioc}");
    }

    #[test]
    fn ioc_of_repetitive_text_is_high() {
        let ioc = calculate_ioc("AAAAABBBBBCCCCC").unwrap();

        assert!(ioc > 0.15, "got {ioc}");
    }

    #[test]
    fn ioc_ignores_case() {
        assert_eq!(
            calculate_ioc("HELLO").unwrap(),
            calculate_ioc("hello").unwrap()
        );
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("1234 ...")]
    fn ioc_needs_at_least_two_letters(#[case] text: &str) {
        let result = calculate_ioc(text);

        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn trigram_score_rewards_english_text() {
        let english = score_trigrams("THE QUICK BROWN FOX AND THE LAZY DOG");
        let gibberish = score_trigrams("ZQXJKVBPWZ QXJKV BPWZQXJ");

        assert!(english > gibberish);
        assert!(gibberish == 0.0);
    }

    #[rstest]
    #[case("")]
    #[case("AB")]
    #[case("1 2 3")]
    fn trigram_score_is_zero_below_three_letters(#[case] text: &str) {
        assert_eq!(score_trigrams(text), 0.0);
    }

    #[test]
    fn scoring_functions_are_idempotent() {
        let text = "SOME SAMPLE TEXT FOR SCORING";
        let observed = [3u32, 1, 4, 1, 5];
        let expected = [2.0, 2.0, 3.0, 1.0, 6.0];

        assert_eq!(
            chi_squared(&observed, &expected).unwrap(),
            chi_squared(&observed, &expected).unwrap()
        );
        assert_eq!(calculate_ioc(text).unwrap(), calculate_ioc(text).unwrap());
        assert_eq!(score_trigrams(text), score_trigrams(text));
    }

    #[test]
    fn trigram_table_is_sorted_for_binary_search() {
        for pair in TRIGRAMS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
