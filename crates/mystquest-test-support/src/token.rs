//! Test token issuer — deterministic `TokenIssuer` for tests.

use std::sync::Mutex;

use mystquest_core::token::TokenIssuer;

/// A token issuer that returns values from a predetermined sequence. Panics
/// if the sequence is exhausted. Used in tests that need repeatable tokens,
/// including collision scenarios for the checked-insert-or-retry loop.
#[derive(Debug)]
pub struct SequenceTokenIssuer {
    tokens: Vec<String>,
    index: Mutex<usize>,
}

impl SequenceTokenIssuer {
    /// Create a new `SequenceTokenIssuer` with the given tokens.
    #[must_use]
    pub fn new<S: Into<String>>(tokens: Vec<S>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            index: Mutex::new(0),
        }
    }
}

impl TokenIssuer for SequenceTokenIssuer {
    fn issue(&self) -> String {
        let mut index = self.index.lock().unwrap();
        let token = self.tokens[*index].clone();
        *index += 1;
        token
    }
}
