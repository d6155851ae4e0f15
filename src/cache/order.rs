//! Insertion Order Module
//!
//! Tracks first-insertion order of keys for capacity eviction.

// == Slot ==
/// Stable handle to a node in an [`InsertionOrder`].
///
/// A slot stays valid until its node is removed. Freed slots are recycled
/// by later insertions, so a handle must be dropped together with its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Insertion Order ==
/// Doubly linked list of keys, stored in an arena and addressed by [`Slot`].
///
/// - Front = oldest insertion (next eviction victim)
/// - Back = newest insertion
///
/// Unlike an LRU tracker, nothing here ever moves a node: order is fixed
/// when the key is pushed.
#[derive(Debug)]
pub struct InsertionOrder<K> {
    /// Node arena, `None` marks a free slot
    nodes: Vec<Option<Node<K>>>,
    /// Free slot indexes available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> Default for InsertionOrder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InsertionOrder<K> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends a key as the newest insertion and returns its slot.
    pub fn push_back(&mut self, key: K) -> Slot {
        let node = Node {
            key,
            prev: self.tail,
            next: None,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        Slot(index)
    }

    // == Remove ==
    /// Unlinks the node at `slot` in O(1) and returns its key.
    ///
    /// Returns None if the slot is already free.
    pub fn remove(&mut self, slot: Slot) -> Option<K> {
        let node = self.nodes.get_mut(slot.0)?.take()?;

        match node.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(slot.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Front ==
    /// Removes and returns the oldest key.
    ///
    /// Returns None if the index is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        let head = self.head?;
        self.remove(Slot(head))
    }

    // == Peek Front ==
    /// Returns the oldest key without removing it.
    pub fn peek_front(&self) -> Option<&K> {
        self.head
            .and_then(|head| self.nodes.get(head))
            .and_then(Option::as_ref)
            .map(|node| &node.key)
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            order: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    /// Drops every node and resets the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<K>> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }
}

/// Front-to-back iterator over an [`InsertionOrder`].
pub struct Iter<'a, K> {
    order: &'a InsertionOrder<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self
            .order
            .nodes
            .get(self.cursor?)
            .and_then(Option::as_ref)?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
