//! Semantic similarity between role titles, backed by an injected embedding provider.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, warn};

/// Failure of the embedding capability. This is the only condition the
/// scoring engine does not default around.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AffinityError {
    #[error("embedding provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Encodes free text into a fixed-dimension vector.
///
/// Implementations are shared across concurrent evaluations and must be safe
/// for concurrent inference.
pub trait EmbeddingProvider: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, AffinityError>;
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<P> {
    fn encode(&self, text: &str) -> Result<Vec<f32>, AffinityError> {
        (**self).encode(text)
    }
}

/// Similarity in `[0, 1]` between two role titles.
pub trait RoleAffinity: Send + Sync {
    fn affinity(&self, role_a: &str, role_b: &str) -> Result<f64, AffinityError>;
}

/// Raw cosine similarity in `[-1, 1]`; zero on dimension mismatch or zero-norm input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Role affinity computed as the clamped cosine of two encoded titles.
///
/// Titles are trimmed and lowercased before encoding, so the provider always
/// receives the normalized text and case variants share one vector. Encoded
/// vectors are memoized per normalized title for the lifetime of the
/// estimator, so one estimator should span one batch of evaluations.
///
/// A non-finite cosine (degenerate embedding) is reported as zero affinity.
pub struct EmbeddingRoleAffinity<P> {
    provider: P,
    cache: Mutex<HashMap<String, Arc<Vec<f32>>>>,
}

impl<P: EmbeddingProvider> EmbeddingRoleAffinity<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_titles(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn vector(&self, text: &str) -> Result<Arc<Vec<f32>>, AffinityError> {
        let key = text.trim().to_lowercase();
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(hit));
        }

        // Encoding runs outside the lock; a racing miss only costs a duplicate encode.
        let encoded = Arc::new(self.provider.encode(&key).map_err(|err| {
            error!(role = %key, %err, "embedding provider failed");
            err
        })?);

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| Arc::clone(&encoded));
        Ok(encoded)
    }
}

impl<P: EmbeddingProvider> RoleAffinity for EmbeddingRoleAffinity<P> {
    fn affinity(&self, role_a: &str, role_b: &str) -> Result<f64, AffinityError> {
        let a = self.vector(role_a)?;
        let b = self.vector(role_b)?;
        let similarity = f64::from(cosine_similarity(&a, &b));
        if !similarity.is_finite() {
            warn!(role_a, role_b, "non-finite role similarity; treating as unrelated");
            return Ok(0.0);
        }
        Ok(similarity.clamp(0.0, 1.0))
    }
}
