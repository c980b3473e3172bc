//! Round-robin rotation over the upstream pool.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Rotation cursor.
/// Each call hands out the whole pool, rotated to start one position past
/// where the previous call started.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }

    /// Return `pool` rotated to start at the cursor and advance the cursor.
    ///
    /// The relative order of upstreams is preserved. Concurrent callers may
    /// occasionally observe the same start; rotation only spreads load.
    pub fn pick_order<T: Clone>(&self, pool: &[T]) -> Vec<T> {
        let len = pool.len();
        if len == 0 {
            return Vec::new();
        }

        let previous = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some((c + 1) % len))
            .unwrap_or_else(|c| c);
        let start = previous % len;

        let mut order = Vec::with_capacity(len);
        order.extend_from_slice(&pool[start..]);
        order.extend_from_slice(&pool[..start]);
        order
    }
}
