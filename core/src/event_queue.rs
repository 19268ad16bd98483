/// Array-backed binary min-heap keyed by `K`, carrying an opaque payload `V`.
///
/// Entries are sifted only on strict inequality, and when both children of a
/// node carry equal keys the left child is taken. The order in which entries
/// with identical keys leave the heap is therefore fixed for a given sequence
/// of operations, which keeps event traces reproducible.
#[derive(Debug, Clone)]
pub struct EventQueue<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialOrd, V> EventQueue<K, V> {
    pub const INITIAL_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.len() == self.entries.capacity() {
            // Double on overflow.
            self.entries.reserve_exact(self.entries.capacity());
        }
        self.entries.push((key, value));
        self.sift_up(self.entries.len() - 1);
    }

    pub fn pop(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        self.sift_down(0);
        min
    }

    pub fn peek(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[parent].0 > self.entries[i].0 {
                self.entries.swap(parent, i);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        while let Some(child) = self.min_child(i) {
            if self.entries[i].0 > self.entries[child].0 {
                self.entries.swap(i, child);
                i = child;
            } else {
                break;
            }
        }
    }

    fn min_child(&self, i: usize) -> Option<usize> {
        let left = 2 * i + 1;
        let right = left + 1;
        if left >= self.entries.len() {
            return None;
        }
        if right >= self.entries.len() || self.entries[left].0 <= self.entries[right].0 {
            Some(left)
        } else {
            Some(right)
        }
    }
}

impl<K: PartialOrd, V> Default for EventQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
