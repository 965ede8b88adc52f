//! Streaming SHA-256, plus a checksum verifier built on top of it.
//!
//! Implemented in-tree rather than pulled from a digest crate; the algorithm
//! is small and having it here keeps the whole toolkit self-contained and
//! readable end to end.

use crate::encoding::bytes_to_hex;

const BLOCK_SIZE: usize = 64;
const DIGEST_SIZE: usize = 32;

const INITIAL_STATE: [u32; 8] = [
    0x6A09E667, 0xBB67AE85, 0x3C6EF372, 0xA54FF53A, 0x510E527F, 0x9B05688C, 0x1F83D9AB, 0x5BE0CD19,
];

const ROUND_CONSTANTS: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[derive(Debug, Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    message_len: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            message_len: 0,
        }
    }
}

impl Sha256 {
    /// One-shot digest of a complete message.
    pub fn digest_message(message: &[u8]) -> [u8; DIGEST_SIZE] {
        let mut hasher = Sha256::default();
        hasher.update(message);
        hasher.finalize()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.message_len += data.len() as u64;

        let mut rest = data;
        if self.buffer_len > 0 {
            let take = (BLOCK_SIZE - self.buffer_len).min(rest.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];
            if self.buffer_len == BLOCK_SIZE {
                let block = self.buffer;
                self.process_block(&block);
                self.buffer_len = 0;
            }
        }
        // Fully absorbed into the partial buffer; the write-back below must
        // not clobber the buffered byte count.
        if rest.is_empty() {
            return;
        }

        let mut chunks = rest.chunks_exact(BLOCK_SIZE);
        for block in &mut chunks {
            let block: [u8; BLOCK_SIZE] = block.try_into().unwrap_or([0u8; BLOCK_SIZE]);
            self.process_block(&block);
        }
        let tail = chunks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffer_len = tail.len();
    }

    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        let bit_len = self.message_len * 8;

        self.pad_message(bit_len);

        let mut digest = [0u8; DIGEST_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        digest
    }

    fn pad_message(&mut self, bit_len: u64) {
        self.update(&[0x80]);
        while self.buffer_len != BLOCK_SIZE - 8 {
            self.update(&[0x00]);
        }
        let block_start = self.buffer_len;
        self.buffer[block_start..].copy_from_slice(&bit_len.to_be_bytes());
        let block = self.buffer;
        self.process_block(&block);
    }

    fn process_block(&mut self, block: &[u8; BLOCK_SIZE]) {
        let mut schedule = [0u32; 64];
        for (i, word) in block.chunks_exact(4).enumerate() {
            schedule[i] = u32::from_be_bytes(word.try_into().unwrap_or([0u8; 4]));
        }
        for i in 16..64 {
            let s0 = schedule[i - 15].rotate_right(7)
                ^ schedule[i - 15].rotate_right(18)
                ^ (schedule[i - 15] >> 3);
            let s1 = schedule[i - 2].rotate_right(17)
                ^ schedule[i - 2].rotate_right(19)
                ^ (schedule[i - 2] >> 10);
            schedule[i] = schedule[i - 16]
                .wrapping_add(s0)
                .wrapping_add(schedule[i - 7])
                .wrapping_add(s1);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.state;
        for i in 0..64 {
            let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ (!e & g);
            let temp1 = h
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(ROUND_CONSTANTS[i])
                .wrapping_add(schedule[i]);
            let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let temp2 = s0.wrapping_add(maj);

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(temp1);
            d = c;
            c = b;
            b = a;
            a = temp1.wrapping_add(temp2);
        }

        let round = [a, b, c, d, e, f, g, h];
        for (state, value) in self.state.iter_mut().zip(round) {
            *state = state.wrapping_add(value);
        }
    }
}

/// Hex digest of a complete message.
pub fn hex_digest(message: &[u8]) -> String {
    bytes_to_hex(&Sha256::digest_message(message))
}

/// Compare data against an expected hex digest, ignoring case.
pub fn verify_checksum(data: &[u8], expected_hex: &str) -> bool {
    hex_digest(data) == expected_hex.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")]
    #[case(b"abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")]
    #[case(
        b"The quick brown fox jumps over the lazy dog",
        "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
    )]
    fn digest_matches_known_vectors(#[case] message: &[u8], #[case] expected: &str) {
        assert_eq!(hex_digest(message), expected);
    }

    #[test]
    fn updates_smaller_than_the_partial_buffer_are_not_lost() {
        let mut hasher = Sha256::default();
        hasher.update(b"ab");
        hasher.update(b"c");

        assert_eq!(hasher.finalize(), Sha256::digest_message(b"abc"));
    }

    #[test]
    fn incremental_updates_match_one_shot_digest() {
        let message = b"a message fed to the hasher in several small pieces";
        let mut hasher = Sha256::default();

        for chunk in message.chunks(7) {
            hasher.update(chunk);
        }

        assert_eq!(hasher.finalize(), Sha256::digest_message(message));
    }

    #[test]
    fn multi_block_messages_digest_correctly() {
        // 200 bytes crosses the 64-byte block boundary three times.
        let message = vec![b'x'; 200];

        assert_eq!(
            Sha256::digest_message(&message),
            {
                let mut hasher = Sha256::default();
                hasher.update(&message[..63]);
                hasher.update(&message[63..130]);
                hasher.update(&message[130..]);
                hasher.finalize()
            }
        );
    }

    #[test]
    fn verify_checksum_ignores_digest_case() {
        let digest = hex_digest(b"abc").to_ascii_uppercase();

        assert!(verify_checksum(b"abc", &digest));
        assert!(!verify_checksum(b"abd", &digest));
    }
}
