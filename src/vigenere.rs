//! Vigenère cipher: a repeating keyword selects a different Caesar shift for
//! each letter position.
//!
//! The attack runs in two phases. First the key length is estimated with the
//! Friedman test: for each candidate length L the ciphertext is partitioned
//! into L columns by position modulo L, and the average per-column Index of
//! Coincidence is compared with the English constant. At the true period each
//! column is a plain Caesar cipher of English, so its IoC rises back to the
//! English value; at wrong periods the mixed alphabets flatten it. Second,
//! each column is solved independently as a Caesar cipher with the same
//! chi-squared scoring the Caesar cracker uses, and the winning shifts are
//! read off as the keyword letters.

use tracing::debug;

use crate::error::{Error, Result};
use crate::result::{CrackResult, CrackedKey};
use crate::stats::{calculate_ioc, score_english, ALPHABET_SIZE, ENGLISH_IOC};

pub const METHOD: &str = "friedman_test";

const MIN_LETTERS: usize = 20;
const MAX_KEY_LENGTH: usize = 20;
const CONFIDENCE_NORM: f64 = 500.0;

/// Encrypt with a repeating keyword. The key index advances only on
/// alphabetic characters; everything else passes through unchanged.
pub fn encrypt(text: &str, key: &str) -> Result<String> {
    let shifts = key_shifts(key)?;
    Ok(apply_shifts(text, &shifts, false))
}

/// Decrypt with a repeating keyword.
pub fn decrypt(text: &str, key: &str) -> Result<String> {
    let shifts = key_shifts(key)?;
    Ok(apply_shifts(text, &shifts, true))
}

/// Recover the keyword via the Friedman test and per-column frequency
/// analysis.
///
/// Needs at least 20 alphabetic characters. If the estimated key length is
/// one the text is effectively monoalphabetic and this cracker deliberately
/// stands down in favour of the Caesar cracker.
pub fn crack(text: &str) -> Result<CrackResult> {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if filtered.len() < MIN_LETTERS {
        return Ok(CrackResult::unsolved(
            METHOD,
            format!("text too short for reliable analysis (minimum {MIN_LETTERS} letters)"),
        ));
    }

    let key_length = estimate_key_length(&filtered);
    debug!(key_length, "friedman test complete");
    if key_length == 1 {
        return Ok(CrackResult::unsolved(
            METHOD,
            "detected as monoalphabetic cipher, use the Caesar cracker instead",
        ));
    }

    let columns = split_columns(&filtered, key_length);
    let mut key = String::with_capacity(key_length);
    let mut total_confidence = 0.0;
    for column in &columns {
        if column.is_empty() {
            key.push('A');
            continue;
        }
        let (shift, score) = solve_column(column);
        key.push((b'A' + shift) as char);
        total_confidence += (1.0 - score / CONFIDENCE_NORM).clamp(0.0, 1.0);
    }
    debug!(%key, "per-column solve complete");

    let plaintext = decrypt(text, &key)
        .map_err(|e| Error::CrackingFailed(format!("failed to decrypt with found key: {e}")))?;
    let confidence = total_confidence / key_length as f64;

    let mut result = CrackResult::solved(
        METHOD,
        CrackedKey::Keyword(key),
        plaintext,
        confidence,
        key_length * ALPHABET_SIZE,
    );
    result.key_length = Some(key_length);
    Ok(result)
}

/// Friedman test: pick the candidate period whose columns look most like
/// English by IoC. The first candidate wins ties, so shorter periods are
/// preferred.
fn estimate_key_length(filtered: &str) -> usize {
    let mut best_length = 1;
    let mut best_distance = f64::INFINITY;

    for length in 1..=MAX_KEY_LENGTH.min(filtered.len() / 2) {
        let columns = split_columns(filtered, length);
        // calculate_ioc samples with replacement, which raises short columns
        // by roughly 1/n; convert each column to the distinct-pair form so
        // candidate lengths are compared on an equal footing.
        let iocs: Vec<f64> = columns
            .iter()
            .filter_map(|column| {
                let n = column.len() as f64;
                calculate_ioc(column).ok().map(|ioc| (ioc * n - 1.0) / (n - 1.0))
            })
            .collect();
        if iocs.is_empty() {
            continue;
        }

        let avg_ioc = iocs.iter().sum::<f64>() / iocs.len() as f64;
        let distance = (avg_ioc - ENGLISH_IOC).abs();
        if distance < best_distance {
            best_distance = distance;
            best_length = length;
        }
    }

    best_length
}

/// Try all 26 shifts on one column and return the minimum-scoring one.
fn solve_column(column: &str) -> (u8, f64) {
    let mut best_shift = 0u8;
    let mut best_score = f64::INFINITY;

    for shift in 0..ALPHABET_SIZE as u8 {
        let decrypted: String = column
            .bytes()
            .map(|b| ((b - b'A' + ALPHABET_SIZE as u8 - shift) % ALPHABET_SIZE as u8 + b'A') as char)
            .collect();
        let score = score_english(&decrypted);
        if score < best_score {
            best_score = score;
            best_shift = shift;
        }
    }

    (best_shift, best_score)
}

fn split_columns(filtered: &str, length: usize) -> Vec<String> {
    let mut columns = vec![String::new(); length];
    for (i, c) in filtered.chars().enumerate() {
        columns[i % length].push(c);
    }
    columns
}

fn key_shifts(key: &str) -> Result<Vec<u8>> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(Error::InvalidKey(
            "key must be a non-empty alphabetic string".into(),
        ));
    }
    Ok(key.bytes().map(|b| b.to_ascii_uppercase() - b'A').collect())
}

fn apply_shifts(text: &str, shifts: &[u8], invert: bool) -> String {
    let mut key_index = 0;
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
                let mut shift = shifts[key_index % shifts.len()];
                if invert {
                    shift = (ALPHABET_SIZE as u8 - shift) % ALPHABET_SIZE as u8;
                }
                key_index += 1;
                ((c as u8 - base + shift) % ALPHABET_SIZE as u8 + base) as char
            } else {
                c
            }
        })
        .collect()
}
