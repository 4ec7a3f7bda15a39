//! Request tokens for weather lookups
//!
//! Lookups can overlap when the user switches tabs or presses Enter
//! repeatedly. Each lookup takes a token; only the holder of the latest
//! token may publish its result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic token source
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer token has been issued since `token`
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let seq = RequestSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(b.value(), a.value() + 1);
    }

    #[test]
    fn test_only_latest_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
