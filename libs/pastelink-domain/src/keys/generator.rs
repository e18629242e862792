//! Key generators
//!
//! A generator only produces candidate strings. Whether a candidate is free is
//! decided by the [`KeyAllocator`](super::KeyAllocator).

use rand::Rng;

/// Default alphabet of [`RandomKeyGenerator`]
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";
const VOWELS: &[u8] = b"aeiou";

/// Port for producing candidate document keys
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    /// Produce a random key of exactly `length` characters
    fn create_key(&self, length: usize) -> String;
}

/// Draws every character uniformly from an alphabet
#[derive(Debug, Clone)]
pub struct RandomKeyGenerator {
    alphabet: Vec<char>,
}

impl RandomKeyGenerator {
    /// Create a generator over [`DEFAULT_ALPHABET`]
    pub fn new() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
        }
    }

    /// Create a generator over a custom alphabet
    ///
    /// Returns `None` for an empty alphabet.
    pub fn with_alphabet(alphabet: &str) -> Option<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return None;
        }
        Some(Self { alphabet })
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn create_key(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect()
    }
}

/// Produces pronounceable keys by alternating consonants and vowels
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneticKeyGenerator;

impl PhoneticKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyGenerator for PhoneticKeyGenerator {
    fn create_key(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        let mut consonant = rng.gen_bool(0.5);
        let mut key = String::with_capacity(length);

        for _ in 0..length {
            let pool = if consonant { CONSONANTS } else { VOWELS };
            key.push(pool[rng.gen_range(0..pool.len())] as char);
            consonant = !consonant;
        }

        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_length_and_alphabet() {
        let generator = RandomKeyGenerator::new();

        for length in [0, 1, 10, 32] {
            let key = generator.create_key(length);
            assert_eq!(key.chars().count(), length);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_random_custom_alphabet() {
        let generator = RandomKeyGenerator::with_alphabet("ab").unwrap();
        let key = generator.create_key(50);

        assert!(key.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_random_empty_alphabet_rejected() {
        assert!(RandomKeyGenerator::with_alphabet("").is_none());
    }

    #[test]
    fn test_phonetic_keys_alternate() {
        let generator = PhoneticKeyGenerator::new();
        let is_vowel = |c: u8| VOWELS.contains(&c);

        for _ in 0..20 {
            let key = generator.create_key(10);
            assert_eq!(key.len(), 10);

            let bytes = key.as_bytes();
            for pair in bytes.windows(2) {
                assert_ne!(is_vowel(pair[0]), is_vowel(pair[1]), "key {} does not alternate", key);
            }
        }
    }
}
