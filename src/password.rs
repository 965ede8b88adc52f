//! Password strength estimation from Shannon entropy.
//!
//! Entropy is `length * log2(pool)`, where the pool size is the sum of the
//! character classes the password draws from (26 lowercase, 26 uppercase,
//! 10 digits, ~32 specials). The time-to-crack figure assumes an offline
//! attacker at ten billion guesses per second, which is in the range of a
//! GPU rig against a fast hash. Both numbers are coarse estimates for
//! teaching, not guarantees.

use crate::error::{Error, Result};

/// Assumed attacker rate, guesses per second.
const GUESSES_PER_SECOND: f64 = 1e10;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_YEAR: f64 = 31_557_600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Entropy bands: below 28 bits cracks in seconds, 128 bits and above is
    /// out of practical reach.
    fn from_entropy(bits: f64) -> Self {
        if bits < 28.0 {
            Strength::VeryWeak
        } else if bits < 36.0 {
            Strength::Weak
        } else if bits < 60.0 {
            Strength::Moderate
        } else if bits < 128.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }
}

#[derive(Debug, Clone)]
pub struct PasswordReport {
    pub entropy_bits: f64,
    pub pool_size: u32,
    pub strength: Strength,
    /// Quality in [0, 1], entropy relative to the 128-bit ceiling.
    pub score: f64,
    pub crack_seconds: f64,
    pub crack_time_display: String,
    pub recommendations: Vec<String>,
}

/// Analyze a password's resistance to brute force.
pub fn analyze(password: &str) -> Result<PasswordReport> {
    if password.is_empty() {
        return Err(Error::InvalidInput("password cannot be empty".into()));
    }

    let pool_size = pool_size(password);
    let entropy_bits = password.chars().count() as f64 * f64::from(pool_size).log2();
    let crack_seconds = 2f64.powf(entropy_bits) / GUESSES_PER_SECOND;

    Ok(PasswordReport {
        entropy_bits,
        pool_size,
        strength: Strength::from_entropy(entropy_bits),
        score: (entropy_bits / 128.0).min(1.0),
        crack_seconds,
        crack_time_display: display_duration(crack_seconds),
        recommendations: recommendations(password),
    })
}

fn pool_size(password: &str) -> u32 {
    let mut pool = 0;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        pool += 26;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        pool += 26;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        pool += 10;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        pool += 32;
    }
    pool
}

fn recommendations(password: &str) -> Vec<String> {
    let mut recs = Vec::new();
    if password.chars().count() < 12 {
        recs.push("increase length to at least 12 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        recs.push("add uppercase letters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        recs.push("add lowercase letters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        recs.push("add digits".to_string());
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        recs.push("add special characters".to_string());
    }
    recs
}

fn display_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        "instantly".to_string()
    } else if seconds < SECONDS_PER_MINUTE {
        format!("{seconds:.0} seconds")
    } else if seconds < SECONDS_PER_HOUR {
        format!("{:.0} minutes", seconds / SECONDS_PER_MINUTE)
    } else if seconds < SECONDS_PER_DAY {
        format!("{:.0} hours", seconds / SECONDS_PER_HOUR)
    } else if seconds < SECONDS_PER_YEAR {
        format!("{:.0} days", seconds / SECONDS_PER_DAY)
    } else if seconds < SECONDS_PER_YEAR * 100.0 {
        format!("{:.0} years", seconds / SECONDS_PER_YEAR)
    } else {
        "centuries".to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn empty_passwords_are_rejected() {
        assert!(matches!(analyze(""), Err(Error::InvalidInput(_))));
    }

    #[rstest]
    #[case("abc", 26)]
    #[case("Abc", 52)]
    #[case("Abc1", 62)]
    #[case("Abc1!", 94)]
    fn pool_size_reflects_character_classes(#[case] password: &str, #[case] expected: u32) {
        let report = analyze(password).unwrap();

        assert_eq!(report.pool_size, expected);
    }

    #[test]
    fn longer_passwords_have_more_entropy() {
        let short = analyze("abcdef").unwrap();
        let long = analyze("abcdefabcdef").unwrap();

        assert!(long.entropy_bits > short.entropy_bits);
        assert!(long.score >= short.score);
    }

    #[rstest]
    #[case("abc", Strength::VeryWeak)]
    #[case("abcdefgh", Strength::Moderate)]
    #[case("Tr0ub4dor&3xplor3r", Strength::Strong)]
    #[case("correct horse battery staple is long", Strength::VeryStrong)]
    fn strength_bands_match_entropy(#[case] password: &str, #[case] expected: Strength) {
        let report = analyze(password).unwrap();

        assert_eq!(report.strength, expected, "{}", report.entropy_bits);
    }

    #[test]
    fn weak_passwords_get_recommendations() {
        let report = analyze("password").unwrap();

        assert!(!report.recommendations.is_empty());
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("12 characters")));
    }

    #[test]
    fn strong_passwords_get_none() {
        let report = analyze("C0rrect!Horse9Battery").unwrap();

        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn crack_time_display_is_humane() {
        let weak = analyze("ab").unwrap();

        assert_eq!(weak.crack_time_display, "instantly");
    }
}
