//! Ordered recency list
//!
//! Doubly-linked list whose nodes live in a slot arena and link to each other
//! by [`Handle`] instead of pointers. Freed slots are recycled through a free
//! list, so handles stay stable for as long as their node is linked.
//!
//! ```text
//!   front ─► [h3] ◄──► [h0] ◄──► [h1] ◄── back
//! ```
//!
//! All operations are O(1). The list has no notion of keys or eviction; it is
//! driven by [`LruCache`](crate::LruCache).

/// Opaque reference to a node in an [`OrderedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    /// Slot index backing this handle
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node in the doubly-linked list
#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Arena-backed doubly-linked list
#[derive(Debug)]
pub struct OrderedList<T> {
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<T> OrderedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the front node
    pub fn front(&self) -> Option<Handle> {
        self.head
    }

    /// Handle of the back node
    pub fn back(&self) -> Option<Handle> {
        self.tail
    }

    /// Payload of a node
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    /// Mutable payload of a node
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.node_mut(handle).map(|node| &mut node.value)
    }

    /// Insert a payload as the new front
    pub fn push_front(&mut self, value: T) -> Handle {
        let handle = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });

        match self.head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }

        self.head = Some(handle);
        self.len += 1;
        handle
    }

    /// Insert a payload as the new back
    pub fn push_back(&mut self, value: T) -> Handle {
        let handle = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(handle);
                }
            }
            None => self.head = Some(handle),
        }

        self.tail = Some(handle);
        self.len += 1;
        handle
    }

    /// Detach a node and return its payload
    ///
    /// `handle` must belong to a node currently linked in this list. A vacant
    /// slot returns `None`; a handle taken from another list is not detected.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.node(handle)?;
        self.unlink(handle);

        let node = self.nodes[handle.0].take()?;
        self.free_list.push(handle.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Relocate a node to the front
    ///
    /// Same precondition as [`remove`](Self::remove). Moving the current front
    /// is a no-op.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.node(handle).is_none() {
            return;
        }

        self.unlink(handle);

        let old_head = self.head;
        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }

        self.head = Some(handle);
    }

    /// Relink the neighbours of `handle` around it. Leaves `len` untouched.
    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = match self.node(handle) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(node) = self.node_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> Handle {
        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                Handle(idx)
            }
            None => {
                self.nodes.push(Some(node));
                Handle(self.nodes.len() - 1)
            }
        }
    }

    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        self.nodes.get(handle.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<T>> {
        self.nodes.get_mut(handle.0).and_then(|slot| slot.as_mut())
    }

    /// Walk the links in both directions and panic on any inconsistency.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.len == 0 {
            assert!(self.head.is_none(), "empty list has a head");
            assert!(self.tail.is_none(), "empty list has a tail");
            return;
        }
        if self.len == 1 {
            assert_eq!(self.head, self.tail, "single node must be head and tail");
        }

        let mut forward = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.node(handle).expect("linked handle points at vacant slot");
            assert_eq!(node.prev, prev, "prev link mismatch at {:?}", handle);
            forward += 1;
            assert!(forward <= self.len, "forward walk longer than len");
            prev = Some(handle);
            cursor = node.next;
        }
        assert_eq!(forward, self.len, "forward walk length");
        assert_eq!(prev, self.tail, "forward walk did not end at tail");

        let mut backward = 0;
        let mut cursor = self.tail;
        while let Some(handle) = cursor {
            backward += 1;
            assert!(backward <= self.len, "backward walk longer than len");
            cursor = self.node(handle).and_then(|node| node.prev);
        }
        assert_eq!(backward, self.len, "backward walk length");

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len, "occupied slots");
        assert_eq!(occupied + self.free_list.len(), self.nodes.len(), "free list");
    }

    /// Handles from front to back.
    #[cfg(test)]
    pub(crate) fn handles(&self) -> Vec<Handle> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            out.push(handle);
            cursor = self.node(handle).and_then(|node| node.next);
        }
        out
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
