//! Hex codec used by the XOR tooling.

use crate::error::{Error, Result};

pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(Error::InvalidInput(format!(
            "hex string must have even length, got {}",
            hex.len()
        )));
    }

    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let high = hex_digit(pair[0])?;
            let low = hex_digit(pair[1])?;
            Ok(high << 4 | low)
        })
        .collect()
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_digit(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidInput(format!(
            "invalid hex digit '{}'",
            c as char
        ))),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0a3f", &[0x0a, 0x3f])]
    #[case("0A3F", &[0x0a, 0x3f])]
    #[case("", &[])]
    #[case("62575c5c5d", &[0x62, 0x57, 0x5c, 0x5c, 0x5d])]
    fn hex_decodes_to_expected_bytes(#[case] hex: &str, #[case] expected: &[u8]) {
        assert_eq!(hex_to_bytes(hex).unwrap(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("0g")]
    #[case("not hex")]
    fn malformed_hex_is_rejected(#[case] hex: &str) {
        assert!(matches!(hex_to_bytes(hex), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn hex_round_trips() {
        let bytes = [0u8, 1, 127, 128, 255];

        let hex = bytes_to_hex(&bytes);

        assert_eq!(hex, "00017f80ff");
        assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
    }
}
