//! Educational toolkit for classical ciphers and their cryptanalysis.
//!
//! Each cipher module exposes deterministic `encrypt`/`decrypt` transforms
//! and a `crack` routine that recovers the key from ciphertext alone using
//! statistical analysis. The crackers all answer with a [`CrackResult`];
//! low-signal input yields `success = false` rather than an error.

mod base64;
mod caesar;
mod encoding;
mod error;
mod morse;
mod password;
mod result;
mod sha256;
mod stats;
mod substitution;
mod vigenere;
mod xor;

pub use base64::{decode as base64_decode, encode as base64_encode, repair_padding};
pub use encoding::{bytes_to_hex, hex_to_bytes};
pub use error::{Error, Result};
pub use password::{analyze as analyze_password, PasswordReport, Strength};
pub use result::{CrackResult, CrackedKey};
pub use sha256::{hex_digest as sha256_hex_digest, verify_checksum, Sha256};
pub use stats::{calculate_ioc, chi_squared, score_trigrams};

pub mod ciphers {
    pub mod caesar {
        pub use crate::caesar::{crack, decrypt, encrypt, METHOD};
    }
    pub mod morse {
        pub use crate::morse::{decode, encode};
    }
    pub mod substitution {
        pub use crate::substitution::{crack, crack_with_rng, decrypt, encrypt, METHOD};
    }
    pub mod vigenere {
        pub use crate::vigenere::{crack, decrypt, encrypt, METHOD};
    }
    pub mod xor {
        pub use crate::xor::{crack, crack_hex, decrypt, encrypt, METHOD};
    }
}
