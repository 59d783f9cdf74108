//! Request Tokens
//!
//! Generation counter used to tell the current request set apart from
//! superseded ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one parameter generation of a scope.
///
/// Every fetch carries the token that was current when it was issued. A
/// response is applied only while its token is still the scope's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-scope token source. Never hands out the same token twice.
#[derive(Debug, Default)]
pub struct TokenMint {
    last: u64,
}

impl TokenMint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next token
    pub fn mint(&mut self) -> RequestToken {
        self.last = self.last.saturating_add(1);
        RequestToken(self.last)
    }

    /// Most recently minted token (`RequestToken(0)` before the first mint)
    pub fn current(&self) -> RequestToken {
        RequestToken(self.last)
    }
}
