/// Anything that can be ordered by the queue.
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// A bounded binary min-heap, ordered by ascending weight.
///
/// Equal weights are not broken by any secondary key: whichever element the heap
/// structure surfaces first wins. Since every operation is deterministic, the same
/// sequence of enqueues always yields the same sequence of dequeues.
pub struct PriorityQueue<T> {
    items: Vec<T>,
    capacity: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PriorityQueueError {
    #[error("Priority queue is full, it can hold at most {capacity} items")]
    Full { capacity: usize },
    #[error("Can't dequeue from an empty priority queue")]
    Empty,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new(capacity: usize) -> Self {
        PriorityQueue {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn enqueue(&mut self, item: T) -> Result<(), PriorityQueueError> {
        if self.is_full() {
            return Err(PriorityQueueError::Full {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        // restore from the first non-leaf down to the root
        for idx in (0..self.items.len() / 2).rev() {
            self.sift_down(idx);
        }
        Ok(())
    }

    /// Remove and return the item with the lowest weight
    pub fn dequeue(&mut self) -> Result<T, PriorityQueueError> {
        if self.is_empty() {
            return Err(PriorityQueueError::Empty);
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < len && self.items[left].weight() < self.items[smallest].weight() {
                smallest = left;
            }
            if right < len && self.items[right].weight() < self.items[smallest].weight() {
                smallest = right;
            }
            if smallest == idx {
                return;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }
}
