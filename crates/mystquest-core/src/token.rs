//! Invitation token issuance abstraction.
//!
//! Tokens are opaque random strings handed to invited players. Issuance is
//! behind a trait so tests inject predetermined sequences and so the
//! checked-insert-or-retry loop in the session context can ask for fresh
//! candidates until one is globally unique.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of issued invitation tokens.
pub const TOKEN_LENGTH: usize = 32;

/// Issues candidate invitation tokens. Uniqueness is the caller's job.
pub trait TokenIssuer: Send + Sync {
    /// Produce one candidate token.
    fn issue(&self) -> String;
}

/// Production issuer drawing alphanumeric characters from the thread RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenIssuer;

impl TokenIssuer for RandomTokenIssuer {
    fn issue(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}
