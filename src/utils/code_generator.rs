//! Short code generation and alias validation.
//!
//! Codes are sampled uniformly from the 62-character alphanumeric alphabet.
//! The generator owns its RNG instance so tests can inject a seeded one
//! instead of relying on process-wide random state.

use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::json;

use crate::error::AppError;

/// The 62-character alphabet codes are drawn from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated short codes.
///
/// 62^6 ≈ 5.6e10 possible codes, so collisions stay negligible well past
/// millions of stored links.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Random short code sampler.
///
/// Purely a sampler: it gives no uniqueness guarantee. Collision handling
/// lives in [`crate::application::services::LinkService`].
pub struct CodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    /// Creates a generator with an explicit RNG instance.
    pub fn with_rng(length: usize, rng: StdRng) -> Self {
        Self {
            length,
            rng: Mutex::new(rng),
        }
    }

    /// Creates a deterministic generator for tests.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }

    /// Samples one code: `length` characters drawn independently and
    /// uniformly from [`ALPHABET`].
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().expect("code generator RNG lock poisoned");

        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// Validates a caller-chosen alias or replacement short code.
///
/// Allowed characters are ASCII letters, digits, `-` and `_`; the alias must
/// be non-empty. No substitution is ever generated for a rejected alias.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the alias violates the character
/// class.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request(
            "Alias must not be empty",
            json!({}),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
