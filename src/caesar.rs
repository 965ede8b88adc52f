//! Caesar cipher: shift every letter by a fixed amount.
//!
//! Cracking is an exhaustive search. There are only 26 possible shifts, so
//! we decrypt with each one and keep the shift whose letter distribution is
//! closest to English by the chi-squared test. Even a poor best match is
//! reported; the confidence field tells the caller how good the fit was.

use tracing::debug;

use crate::error::{Error, Result};
use crate::result::{CrackResult, CrackedKey};
use crate::stats::{score_english, ALPHABET_SIZE};

pub const METHOD: &str = "frequency_analysis";

// Chi-squared scores beyond this are treated as zero confidence.
const CONFIDENCE_NORM: f64 = 500.0;

/// Encrypt by shifting each letter forward. Case is preserved and
/// non-alphabetic characters pass through unchanged.
pub fn encrypt(text: &str, shift: u8) -> Result<String> {
    validate_shift(shift)?;
    Ok(shift_text(text, shift))
}

/// Decrypt by shifting each letter backward.
pub fn decrypt(text: &str, shift: u8) -> Result<String> {
    validate_shift(shift)?;
    Ok(shift_text(text, (ALPHABET_SIZE as u8 - shift) % ALPHABET_SIZE as u8))
}

/// Recover the shift with chi-squared frequency analysis.
///
/// Tries all 26 shifts and picks the minimum-scoring one. Input without any
/// alphabetic characters is reported as unsuccessful with zero attempts.
/// The full per-shift score table is kept in the result.
pub fn crack(text: &str) -> Result<CrackResult> {
    if !text.bytes().any(|b| b.is_ascii_alphabetic()) {
        return Ok(CrackResult::unsolved(
            METHOD,
            "no alphabetic characters to analyze",
        ));
    }

    let mut scores = vec![f64::INFINITY; ALPHABET_SIZE];
    let mut best_shift = 0u8;
    let mut best_score = f64::INFINITY;
    let mut best_plaintext = String::new();

    for shift in 0..ALPHABET_SIZE as u8 {
        // A failing candidate is skipped rather than aborting the search.
        let Ok(plaintext) = decrypt(text, shift) else {
            continue;
        };
        let score = score_english(&plaintext);
        scores[shift as usize] = score;

        if score < best_score {
            best_score = score;
            best_shift = shift;
            best_plaintext = plaintext;
        }
    }
    debug!(best_shift, best_score, "caesar search complete");

    let confidence = (1.0 - best_score / CONFIDENCE_NORM).clamp(0.0, 1.0);
    let mut result = CrackResult::solved(
        METHOD,
        CrackedKey::Shift(best_shift),
        best_plaintext,
        confidence,
        ALPHABET_SIZE,
    );
    result.scores = Some(scores);
    result.best_score = Some(best_score);
    Ok(result)
}

fn validate_shift(shift: u8) -> Result<()> {
    if shift >= ALPHABET_SIZE as u8 {
        return Err(Error::InvalidKey(format!(
            "shift must be in range [0, 25], got {shift}"
        )));
    }
    Ok(())
}

fn shift_text(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
                ((c as u8 - base + shift) % ALPHABET_SIZE as u8 + base) as char
            } else {
                c
            }
        })
        .collect()
}
