use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use super::affinity::{AffinityError, EmbeddingProvider};

// Changing either seed changes every encoded vector.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

/// Deterministic in-process embedding provider based on signed feature hashing.
///
/// Each lowercase word token of the text lands in one dimension with a sign
/// derived from a second hash; the result is L2-normalized. Titles sharing
/// words score high, disjoint titles score near zero. No model weights are
/// involved, so the provider is trivially safe for concurrent use.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbeddingProvider {
    dimension: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn hash(token: &str, salt: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        hasher.write(token.as_bytes());
        hasher.write(salt);
        hasher.finish()
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EmbeddingProvider for HashingEmbeddingProvider {
    fn encode(&self, text: &str) -> Result<Vec<f32>, AffinityError> {
        let mut vector = vec![0.0f32; self.dimension];

        let tokens = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase);

        for token in tokens {
            let index = (Self::hash(&token, b"index") % self.dimension as u64) as usize;
            let sign = if Self::hash(&token, b"sign") % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[index] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        Ok(vector)
    }
}
