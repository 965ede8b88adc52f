//! XOR cipher over raw bytes, with a brute-force attack on single-byte keys.
//!
//! XOR with a repeating key is symmetric, so encryption and decryption are
//! the same operation. For a single-byte key there are only 256 candidates;
//! we try them all and rank the decryptions with a plaintext-likelihood
//! heuristic rather than pure letter frequencies, because the plaintext may
//! contain digits, punctuation and mixed case that a chi-squared test over
//! A-Z would ignore. Candidates that do not even decode as UTF-8 are given a
//! strongly negative sentinel score so they can never win. The 256 trials
//! are independent and run in parallel; the winner is still chosen by a
//! sequential scan in key order so the lowest winning key is deterministic.

use rayon::prelude::*;
use tracing::debug;

use crate::encoding::hex_to_bytes;
use crate::error::{Error, Result};
use crate::result::{CrackResult, CrackedKey};
use crate::stats::COMMON_WORDS;

pub const METHOD: &str = "single_byte_brute_force";

const KEY_SPACE: usize = 256;
// Sentinel for candidates that are not valid UTF-8.
const INVALID_UTF8_SCORE: f64 = -1000.0;
const CONFIDENCE_NORM: f64 = 100.0;

/// XOR data with a repeating key.
pub fn encrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::InvalidKey("key cannot be empty".into()));
    }
    Ok(data
        .iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect())
}

/// XOR is symmetric: decryption is the same operation as encryption.
pub fn decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    encrypt(data, key)
}

/// Crack a hex-encoded ciphertext. Input that is not valid hex is an
/// `InvalidInput` error rather than an unsuccessful result.
pub fn crack_hex(hex: &str) -> Result<CrackResult> {
    let bytes = hex_to_bytes(hex)?;
    crack(&bytes)
}

/// Brute-force the single-byte key.
///
/// All 256 keys are tried and scored; the maximum-scoring candidate wins.
/// The crack is reported successful only when the best score is positive,
/// meaning at least one candidate looked more like text than noise.
pub fn crack(data: &[u8]) -> Result<CrackResult> {
    if data.is_empty() {
        return Ok(CrackResult::unsolved(METHOD, "empty data"));
    }

    let candidates: Vec<(f64, Option<String>)> = (0..=255u8)
        .into_par_iter()
        .map(|key| {
            let decrypted: Vec<u8> = data.iter().map(|b| b ^ key).collect();
            match String::from_utf8(decrypted) {
                Ok(text) => (score_plaintext(&text), Some(text)),
                Err(_) => (INVALID_UTF8_SCORE, None),
            }
        })
        .collect();

    let mut best_key = 0u8;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_plaintext = None;
    let mut scores = Vec::with_capacity(KEY_SPACE);
    for (key, (score, plaintext)) in candidates.into_iter().enumerate() {
        scores.push(score);
        if score > best_score {
            best_score = score;
            best_key = key as u8;
            best_plaintext = plaintext;
        }
    }
    debug!(best_key, best_score, "xor brute force complete");

    if best_score <= 0.0 || best_plaintext.is_none() {
        let mut result = CrackResult::unsolved(METHOD, "no candidate resembled plaintext");
        result.attempts = KEY_SPACE;
        result.scores = Some(scores);
        result.best_score = Some(best_score);
        return Ok(result);
    }

    let confidence = (best_score / CONFIDENCE_NORM).min(1.0);
    let mut result = CrackResult::solved(
        METHOD,
        CrackedKey::Byte(best_key),
        best_plaintext.unwrap_or_default(),
        confidence,
        KEY_SPACE,
    );
    result.scores = Some(scores);
    result.best_score = Some(best_score);
    Ok(result)
}

/// Heuristic plaintext score: rewards printable, alphabetic and space
/// characters plus common short English words, penalizes control bytes.
/// Normalized per character and rescaled by 100; higher is better.
fn score_plaintext(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    let mut chars = 0usize;
    for c in text.chars() {
        chars += 1;
        if matches!(c, '\n' | '\r' | '\t') || !c.is_control() {
            score += 1.0;
        } else {
            score -= 5.0;
        }
        if c.is_alphabetic() {
            score += 2.0;
        }
        if c == ' ' {
            score += 1.0;
        }
    }

    let lowered = text.to_lowercase();
    let word_hits = lowered
        .split_whitespace()
        .filter(|word| COMMON_WORDS.contains(word))
        .count();
    score += word_hits as f64 * 10.0;

    score / chars as f64 * 100.0
}
