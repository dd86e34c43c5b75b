use std::cmp::Ordering;

/// Binary min-heap ordered by `cmp` (smallest first).
///
/// `extract_min`/`peek` on an empty queue return `None`; event loops use that
/// as their termination condition.
#[derive(Clone)]
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    heap: Vec<T>,
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: F) -> Self {
        Self {
            heap: Vec::new(),
            cmp,
        }
    }

    pub fn with_capacity(cmp: F, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Push and sift up. O(log n).
    pub fn insert(&mut self, item: T) {
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Pop the minimum. O(log n).
    pub fn extract_min(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Remove a specific item located by linear scan. O(n).
    pub fn remove(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let idx = self.heap.iter().position(|x| x == item)?;
        let last = self.heap.len() - 1;
        self.heap.swap(idx, last);
        let removed = self.heap.pop();
        if idx < self.heap.len() {
            // The moved element may violate order in either direction.
            self.sift_up(idx);
            self.sift_down(idx);
        }
        removed
    }

    /// Drain all items in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(x) = self.extract_min() {
            out.push(x);
        }
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if (self.cmp)(&self.heap[idx], &self.heap[parent]) == Ordering::Less {
                self.heap.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < n && (self.cmp)(&self.heap[left], &self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < n && (self.cmp)(&self.heap[right], &self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}
