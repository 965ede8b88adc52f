//! International Morse code. Letters are separated by spaces and words by a
//! forward slash.

use crate::error::{Error, Result};

const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('!', "-.-.--"),
    ('\'', ".----."),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('"', ".-..-."),
    ('@', ".--.-."),
];

pub fn encode(text: &str) -> Result<String> {
    let mut tokens = Vec::new();
    for c in text.chars() {
        if c == ' ' {
            tokens.push("/".to_string());
            continue;
        }
        let upper = c.to_ascii_uppercase();
        let code = MORSE_TABLE
            .iter()
            .find(|&&(symbol, _)| symbol == upper)
            .map(|&(_, code)| code)
            .ok_or_else(|| Error::InvalidInput(format!("no morse code for character '{c}'")))?;
        tokens.push(code.to_string());
    }
    Ok(tokens.join(" "))
}

pub fn decode(code: &str) -> Result<String> {
    let mut out = String::new();
    for token in code.split_whitespace() {
        if token == "/" {
            out.push(' ');
            continue;
        }
        let symbol = MORSE_TABLE
            .iter()
            .find(|&&(_, c)| c == token)
            .map(|&(symbol, _)| symbol)
            .ok_or_else(|| Error::InvalidInput(format!("unknown morse sequence '{token}'")))?;
        out.push(symbol);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn encode_matches_known_vector() {
        assert_eq!(encode("HELLO").unwrap(), ".... . .-.. .-.. ---");
    }

    #[test]
    fn words_are_separated_by_slashes() {
        assert_eq!(encode("SO S").unwrap(), "... --- / ...");
    }

    #[rstest]
    #[case("HELLO WORLD")]
    #[case("sos 123")]
    #[case("WHAT? YES!")]
    fn round_trips_uppercased(#[case] text: &str) {
        let encoded = encode(text).unwrap();

        assert_eq!(decode(&encoded).unwrap(), text.to_ascii_uppercase());
    }

    #[test]
    fn unsupported_characters_are_rejected() {
        assert!(matches!(encode("héllo"), Err(Error::InvalidInput(_))));
        assert!(matches!(decode("...---..."), Err(Error::InvalidInput(_))));
    }
}
