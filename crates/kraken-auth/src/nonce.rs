//! Per-credential nonce generation
//!
//! Kraken rejects any private request whose nonce is not strictly greater
//! than the last one it accepted for the same API key. One [`NonceSource`]
//! must therefore back every request made with a given key pair.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce generator seeded from wall-clock time
///
/// Each value is `max(previous + 1, now in microseconds)`, so nonces track
/// the clock when requests are sparse and keep increasing when they are
/// issued faster than the clock ticks or the clock steps backwards.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    /// Create a nonce source with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a nonce source whose first nonce is strictly greater than `last`
    ///
    /// Useful when a key has been used with nonces ahead of the local clock.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Produce the next nonce
    ///
    /// Safe to call from many threads; no two calls return the same value.
    pub fn next(&self) -> u64 {
        let now = now_micros();
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(advance(last, now))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        advance(previous, now)
    }

    /// The most recently issued nonce, if any
    pub fn last(&self) -> Option<u64> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some(n),
        }
    }
}

fn advance(last: u64, now: u64) -> u64 {
    now.max(last.saturating_add(1))
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequential_nonces_strictly_increase() {
        let source = NonceSource::new();
        let mut previous = source.next();
        for _ in 0..10_000 {
            let next = source.next();
            assert!(next > previous, "{} not greater than {}", next, previous);
            previous = next;
        }
        assert_eq!(source.last(), Some(previous));
    }

    #[test]
    fn test_nonce_tracks_wall_clock() {
        let before = now_micros();
        let nonce = NonceSource::new().next();
        assert!(nonce >= before);
    }

    #[test]
    fn test_starting_after_future_value() {
        let ahead = now_micros() + 3_600_000_000;
        let source = NonceSource::starting_after(ahead);
        assert_eq!(source.next(), ahead + 1);
        assert_eq!(source.next(), ahead + 2);
    }

    #[test]
    fn test_concurrent_nonces_are_unique() {
        let source = Arc::new(NonceSource::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || {
                    let mut seen = Vec::with_capacity(1000);
                    for _ in 0..1000 {
                        seen.push(source.next());
                    }
                    seen
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            let seen = handle.join().unwrap();
            // Each thread observes its own nonces in increasing order
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            for nonce in seen {
                assert!(all.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(all.len(), 8000);
    }

    #[test]
    fn test_empty_source_has_no_last() {
        assert_eq!(NonceSource::new().last(), None);
    }
}
