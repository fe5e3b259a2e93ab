//! Single-entry memoization for derived state
//!
//! A [`Memo`] remembers the last input it was called with and the value it
//! produced. Calling it again with an equal input returns the cached value
//! without running the computation. Any other input replaces the entry.
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe, last-input memo cell.
pub struct Memo<K, V> {
    entry: Mutex<Option<(K, V)>>,
    recomputations: AtomicU64,
}

impl<K, V> Memo<K, V>
where
    K: PartialEq,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, or compute and cache it.
    ///
    /// The lock is held across `compute`, so concurrent callers with the same
    /// key run the computation once.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        let mut entry = self.entry.lock();
        if let Some((cached_key, cached)) = entry.as_ref() {
            if *cached_key == key {
                return cached.clone();
            }
        }

        let value = compute(&key);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *entry = Some((key, value.clone()));
        value
    }

    /// Number of times the computation actually ran.
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: PartialEq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_same_key_hits_cache() {
        let memo: Memo<u32, String> = Memo::new();
        let first = memo.get_or_compute(1, |k| format!("v{}", k));
        let second = memo.get_or_compute(1, |_| panic!("should not recompute"));
        assert_eq!(first, "v1");
        assert_eq!(second, "v1");
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn test_new_key_replaces_entry() {
        let memo: Memo<u32, u32> = Memo::new();
        assert_eq!(memo.get_or_compute(2, |k| k * 10), 20);
        assert_eq!(memo.get_or_compute(3, |k| k * 10), 30);
        // Only the last input is remembered
        assert_eq!(memo.get_or_compute(2, |k| k * 100), 200);
        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn test_thread_safety() {
        use std::thread;

        let memo: Arc<Memo<u8, u8>> = Arc::new(Memo::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let memo = Arc::clone(&memo);
                thread::spawn(move || memo.get_or_compute(7, |k| k + 1))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 8);
        }
        assert_eq!(memo.recomputations(), 1);
    }
}
