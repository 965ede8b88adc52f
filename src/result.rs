/// The recovered key, which takes a different shape for each cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackedKey {
    /// Caesar shift in [0, 25].
    Shift(u8),
    /// Single-byte XOR key.
    Byte(u8),
    /// Vigenère keyword.
    Keyword(String),
    /// 26-letter substitution alphabet.
    Permutation(String),
}

/// Outcome of a single crack attempt.
///
/// Every cracker answers with one of these rather than erroring on
/// low-signal input; callers must branch on `success`. A successful result
/// always carries both the key and the plaintext, and an unsuccessful one
/// carries neither. The remaining fields are per-cipher diagnostics.
#[derive(Debug, Clone)]
pub struct CrackResult {
    pub success: bool,
    pub key: Option<CrackedKey>,
    pub plaintext: Option<String>,
    /// Heuristic quality of the recovered key in [0, 1]. Not a probability.
    pub confidence: f64,
    pub method: &'static str,
    pub attempts: usize,
    /// Per-candidate score table, indexed by shift (Caesar) or key byte (XOR).
    pub scores: Option<Vec<f64>>,
    /// Key length detected by the Friedman test (Vigenère only).
    pub key_length: Option<usize>,
    /// Best raw score seen during the search.
    pub best_score: Option<f64>,
    /// Iteration budget of the search (hill climbing only).
    pub iterations: Option<usize>,
    /// Human-readable explanation, mostly for unsuccessful results.
    pub note: Option<String>,
}

impl CrackResult {
    pub fn solved(
        method: &'static str,
        key: CrackedKey,
        plaintext: String,
        confidence: f64,
        attempts: usize,
    ) -> Self {
        Self {
            success: true,
            key: Some(key),
            plaintext: Some(plaintext),
            confidence: confidence.clamp(0.0, 1.0),
            method,
            attempts,
            scores: None,
            key_length: None,
            best_score: None,
            iterations: None,
            note: None,
        }
    }

    pub fn unsolved(method: &'static str, note: impl Into<String>) -> Self {
        Self {
            success: false,
            key: None,
            plaintext: None,
            confidence: 0.0,
            method,
            attempts: 0,
            scores: None,
            key_length: None,
            best_score: None,
            iterations: None,
            note: Some(note.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_results_carry_key_and_plaintext() {
        let result = CrackResult::solved(
            "test",
            CrackedKey::Shift(3),
            "HELLO".into(),
            0.9,
            26,
        );

        assert!(result.success);
        assert_eq!(result.key, Some(CrackedKey::Shift(3)));
        assert_eq!(result.plaintext.as_deref(), Some("HELLO"));
    }

    #[test]
    fn unsolved_results_carry_neither_key_nor_plaintext() {
        let result = CrackResult::unsolved("test", "no alphabetic characters");

        assert!(!result.success);
        assert!(result.key.is_none());
        assert!(result.plaintext.is_none());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn confidence_is_clamped_to_unit_interval() {
        let result =
            CrackResult::solved("test", CrackedKey::Byte(42), "hi".into(), 3.2, 256);

        assert_eq!(result.confidence, 1.0);
    }
}
