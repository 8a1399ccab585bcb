//! Generic two-slot state holder
//!
//! Readers observe the committed slot while writers stage the next one; a
//! swap flips which slot is committed without copying. No thread-safety is
//! provided at this level: the owning tick protocol is the synchronization.

/// Current/next pair for any cloneable state type
#[derive(Debug, Clone)]
pub struct DoubleBuffer<S> {
    slots: [S; 2],
    front: usize,
}

impl<S: Clone> DoubleBuffer<S> {
    /// Create a buffer with both slots initialized to `initial`
    pub fn new(initial: S) -> Self {
        Self {
            slots: [initial.clone(), initial],
            front: 0,
        }
    }

    /// The committed state readers should observe
    pub fn current(&self) -> &S {
        &self.slots[self.front]
    }

    /// The staged state, read-only
    pub fn next(&self) -> &S {
        &self.slots[1 - self.front]
    }

    /// The staged state, for incremental mutation
    pub fn next_mut(&mut self) -> &mut S {
        &mut self.slots[1 - self.front]
    }

    /// Flip which slot is committed; O(1), no data is copied
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// Deep-copy the committed state into the staged slot
    ///
    /// Required before mutating the staged state incrementally so fields the
    /// writer does not touch retain their committed values instead of data
    /// from two swaps ago.
    pub fn equalize(&mut self) {
        let committed = self.slots[self.front].clone();
        self.slots[1 - self.front] = committed;
    }
}

impl<S: Clone + Default> Default for DoubleBuffer<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_distinct() {
        let mut buffer = DoubleBuffer::new(0u32);
        *buffer.next_mut() = 7;

        assert_eq!(*buffer.current(), 0);
        assert_eq!(*buffer.next(), 7);
    }

    #[test]
    fn test_swap_exchanges_roles_without_copy() {
        let mut buffer = DoubleBuffer::new(1u32);
        *buffer.next_mut() = 2;

        buffer.swap();
        assert_eq!(*buffer.current(), 2);
        assert_eq!(*buffer.next(), 1);

        // The sentinel survives a second swap with no equalize in between,
        // so swapping moved roles rather than copying data.
        buffer.swap();
        assert_eq!(*buffer.current(), 1);
        assert_eq!(*buffer.next(), 2);
    }

    #[test]
    fn test_equalize_copies_committed_into_staged() {
        let mut buffer = DoubleBuffer::new(vec![1, 2, 3]);
        buffer.next_mut().push(4);

        buffer.equalize();
        assert_eq!(*buffer.next(), vec![1, 2, 3]);
        assert_eq!(*buffer.current(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stale_staged_data_without_equalize() {
        let mut buffer = DoubleBuffer::new(10u32);
        *buffer.next_mut() = 20;
        buffer.swap();

        // The staged slot still holds the value committed two swaps ago
        assert_eq!(*buffer.next(), 10);

        buffer.equalize();
        assert_eq!(*buffer.next(), 20);
    }
}
