//! Pages, Requests and Fetch Errors
//!
//! Wire-level shapes of the fetch contract.

use serde::{Deserialize, Serialize};

use crate::token::RequestToken;

/// One page of results from a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in source order
    pub items: Vec<T>,
    /// Total matching count, as reported by the source (may be approximate)
    pub total: usize,
    /// Whether more items remain after this page
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, has_more: bool) -> Self {
        Self { items, total, has_more }
    }

    /// Terminal page with no matches
    pub fn empty() -> Self {
        Self { items: Vec::new(), total: 0, has_more: false }
    }
}

/// Identity of one issued fetch: which generation, which offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub offset: usize,
}

impl FetchTicket {
    /// First page of a generation
    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }
}

/// A fetch the controller wants executed.
///
/// Parameters and token are captured when the request is built, never
/// re-read when the response arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchRequest<P> {
    pub offset: usize,
    pub params: P,
    pub token: RequestToken,
}

impl<P> FetchRequest<P> {
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket { token: self.token, offset: self.offset }
    }
}

/// Page tagged with the token of the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse<T> {
    #[serde(flatten)]
    pub page: Page<T>,
    pub token: RequestToken,
}

/// Source failures.
///
/// Stale responses are not errors and never show up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchError {
    /// The request did not reach the source or the source gave up
    Transport(String),
    /// The source answered with something that is not a page
    Decode(String),
    /// The source answered with a token other than the one it was asked for
    TokenMismatch { sent: RequestToken, received: RequestToken },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            FetchError::TokenMismatch { sent, received } => {
                write!(f, "Token mismatch: sent {}, received {}", sent, received)
            }
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult<T> = Result<FetchResponse<T>, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_reads_camel_case_wire_shape() {
        let json = r#"{"items":[1,2,3],"total":10,"hasMore":true,"token":4}"#;
        let response: FetchResponse<u32> = serde_json::from_str(json).unwrap();

        assert_eq!(response.token, RequestToken(4));
        assert_eq!(response.page, Page::new(vec![1, 2, 3], 10, true));
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::TokenMismatch { sent: RequestToken(2), received: RequestToken(1) };
        assert_eq!(err.to_string(), "Token mismatch: sent #2, received #1");
        assert_eq!(FetchError::Transport("offline".into()).to_string(), "Transport error: offline");
    }
}
