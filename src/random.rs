//! Random sources.
//!
//! Every operation that consumes randomness is generic over [`rand::Rng`], so
//! callers inject the source. The default is `rand::rng()`, which is fast but
//! makes no cryptographic promise. [`KeystreamRng`] expands a 256-bit key with
//! ChaCha20 and yields reproducible output for a given key or seed phrase.

use blake2::{Blake2b512, Digest};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;
const BUFFER_LEN: usize = 1024;

pub struct KeystreamRng {
    cipher: ChaCha20,
    buffer: Zeroizing<[u8; BUFFER_LEN]>,
    pos: usize,
}

impl KeystreamRng {
    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new([0u8; BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer[..]);

        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    /// Derives the key from the first 32 bytes of BLAKE2b-512 over `phrase`.
    pub fn from_phrase(phrase: &str) -> Self {
        let mut hasher = Blake2b512::new();
        hasher.update(phrase.as_bytes());
        let digest = Zeroizing::new(hasher.finalize().to_vec());

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&digest[..KEY_LEN]);

        Self::from_key(&key)
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(&mut self.buffer[..]);
        self.pos = 0;
    }
}

impl RngCore for KeystreamRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut written = 0;

        while written < dest.len() {
            if self.pos >= BUFFER_LEN {
                self.refill();
            }

            let take = (BUFFER_LEN - self.pos).min(dest.len() - written);
            dest[written..written + take].copy_from_slice(&self.buffer[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_key_same_stream() {
        let mut a = KeystreamRng::from_key(&[42u8; 32]);
        let mut b = KeystreamRng::from_key(&[42u8; 32]);

        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_different_keys_differ() {
        let mut a = KeystreamRng::from_key(&[1u8; 32]);
        let mut b = KeystreamRng::from_key(&[2u8; 32]);

        let left: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn test_phrase_is_deterministic() {
        let mut a = KeystreamRng::from_phrase("correct horse");
        let mut b = KeystreamRng::from_phrase("correct horse");
        let mut c = KeystreamRng::from_phrase("battery staple");

        let first = a.next_u64();
        assert_eq!(first, b.next_u64());
        assert_ne!(first, c.next_u64());
    }

    #[test]
    fn test_stream_continues_across_refill() {
        let mut chunked = KeystreamRng::from_key(&[9u8; 32]);
        let mut whole = KeystreamRng::from_key(&[9u8; 32]);

        let mut expected = vec![0u8; BUFFER_LEN * 3 + 17];
        whole.fill_bytes(&mut expected);

        let mut actual = Vec::with_capacity(expected.len());
        let mut chunk = [0u8; 100];
        while actual.len() < expected.len() {
            let take = chunk.len().min(expected.len() - actual.len());
            chunked.fill_bytes(&mut chunk[..take]);
            actual.extend_from_slice(&chunk[..take]);
        }

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_refill_does_not_repeat_buffer() {
        let mut rng = KeystreamRng::from_key(&[3u8; 32]);

        let mut first = vec![0u8; BUFFER_LEN];
        let mut second = vec![0u8; BUFFER_LEN];
        rng.fill_bytes(&mut first);
        rng.fill_bytes(&mut second);

        assert_ne!(first, second);
    }

    #[test]
    fn test_range_draws_are_in_bounds() {
        let mut rng = KeystreamRng::from_key(&[5u8; 32]);
        for bound in 1..50usize {
            for _ in 0..20 {
                assert!(rng.random_range(0..bound) < bound);
            }
        }
    }
}
