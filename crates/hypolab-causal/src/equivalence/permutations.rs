//! Iterative Heap's-algorithm permutation enumeration.
//!
//! Yields each of the `n!` orderings exactly once, reusing one buffer. The
//! borrowed slice is only valid until the next call, so this is a streaming
//! cursor rather than an `Iterator`.

#[derive(Debug, Clone)]
pub struct HeapPermutations<T> {
    items: Vec<T>,
    counters: Vec<usize>,
    cursor: usize,
    started: bool,
}

impl<T> HeapPermutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let n = items.len();
        Self {
            items,
            counters: vec![0; n],
            cursor: 1,
            started: false,
        }
    }

    /// Advance to the next permutation. The first call returns the input order.
    pub fn next_permutation(&mut self) -> Option<&[T]> {
        if !self.started {
            self.started = true;
            return Some(&self.items);
        }
        while self.cursor < self.items.len() {
            let i = self.cursor;
            if self.counters[i] < i {
                if i % 2 == 0 {
                    self.items.swap(0, i);
                } else {
                    self.items.swap(self.counters[i], i);
                }
                self.counters[i] += 1;
                self.cursor = 1;
                return Some(&self.items);
            }
            self.counters[i] = 0;
            self.cursor += 1;
        }
        None
    }
}

/// `n!`, or `None` on overflow. Used for logging only.
pub fn permutation_count(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}
