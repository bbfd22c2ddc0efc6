use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// A min-priority queue of `(priority, node)` entries for shortest path algorithms
///
/// Entries are ordered by priority first and by node second, so among entries with equal
/// priority the smallest node is popped first. This makes the order in which a search
/// settles nodes, and therefore which of several equally short paths it reports, a
/// function of the input alone.
///
/// The queue never updates an entry in place. Pushing a node again with a better priority
/// leaves the old entry behind; callers recognise and skip such stale entries when they
/// are popped.
#[derive(Debug)]
pub struct BinaryHeapWrapper<V, P>
where
    V: Clone + Ord + Debug,
    P: Copy + Ord + Debug,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> Default for BinaryHeapWrapper<V, P>
where
    V: Clone + Ord + Debug,
    P: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> BinaryHeapWrapper<V, P>
where
    V: Clone + Ord + Debug,
    P: Copy + Ord + Debug,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::new(),
        }
    }

    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of entries in the priority queue, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes a node with the given priority into the priority queue
    pub fn push(&mut self, vertex: V, priority: P) {
        self.heap.push(Reverse((priority, vertex)));
    }

    /// Removes the entry with the lowest priority
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, vertex))| (vertex, priority))
    }

    /// Returns the entry with the lowest priority without removing it
    pub fn peek(&self) -> Option<(&V, P)> {
        self.heap.peek().map(|Reverse((priority, vertex))| (vertex, *priority))
    }
}
