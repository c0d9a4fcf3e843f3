//! Pooled storage for tree nodes.
//!
//! Slots live in a single `Vec`. Released slots are threaded into a free list
//! through their `next_free` field and handed out again before the vector
//! grows, so both [`Arena::allocate`] and [`Arena::release_one`] are amortized
//! O(1). Tearing down a whole tree is a single [`Arena::release_all`].

use std::ops::{Index, IndexMut};

use crate::node::{BackRef, Node};
use crate::reference::NodeId;
use crate::types::Var;

#[derive(Clone)]
struct Entry {
    node: Node,
    /// Next free slot, while this one is free.
    next_free: Option<u32>,
    occupied: bool,
}

impl Entry {
    fn new(node: Node) -> Self {
        Self {
            node,
            next_free: None,
            occupied: true,
        }
    }
}

#[derive(Clone, Default)]
pub struct Arena {
    data: Vec<Entry>,
    /// Head of the free list.
    free_head: Option<u32>,
    /// Number of live nodes.
    real_size: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of slots, live or free.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
    /// Number of live nodes.
    pub fn size(&self) -> usize {
        self.real_size
    }

    /// Check whether `id` names a live slot of this arena.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.data.get(id.index()).is_some_and(|entry| entry.occupied)
    }

    /// Allocate an unlinked node with the given label and return its handle.
    pub fn allocate(&mut self, variable: Option<Var>, value: bool) -> NodeId {
        let node = Node::new(variable, value);
        let index = match self.free_head {
            Some(index) => {
                let entry = &mut self.data[index as usize];
                debug_assert!(!entry.occupied);
                self.free_head = entry.next_free;
                *entry = Entry::new(node);
                index
            }
            None => {
                let index = u32::try_from(self.data.len()).unwrap_or_else(|_| panic!("Arena is full"));
                self.data.push(Entry::new(node));
                index
            }
        };
        self.real_size += 1;
        NodeId::new(index)
    }

    /// Return a single childless node's slot to the pool.
    pub fn release_one(&mut self, id: NodeId) {
        assert!(self.is_live(id), "Node {} is not live", id);
        let free_head = self.free_head;
        let entry = &mut self.data[id.index()];
        assert!(entry.node.is_leaf(), "Node {} still has children", id);

        entry.occupied = false;
        entry.next_free = free_head;
        self.free_head = Some(id.get());
        self.real_size -= 1;
    }

    /// Drop every node at once. All outstanding handles become invalid.
    pub fn release_all(&mut self) {
        self.data.clear();
        self.free_head = None;
        self.real_size = 0;
    }

    /// Link the unlinked `child` into `parent`'s child list right after `prev`,
    /// or at the head of the list when `prev` is `None`.
    pub fn attach(&mut self, parent: NodeId, prev: Option<NodeId>, child: NodeId) {
        debug_assert_eq!(self[child].back, BackRef::None);
        let next = match prev {
            Some(prev) => self[prev].next_sibling.replace(child),
            None => self[parent].first_child.replace(child),
        };
        if let Some(next) = next {
            self[next].back = BackRef::PrevSibling(child);
        }

        let node = &mut self[child];
        node.next_sibling = next;
        node.back = match prev {
            Some(prev) => BackRef::PrevSibling(prev),
            None => BackRef::Parent(parent),
        };
    }

    /// Iterate over the children of `parent`, in sibling order.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self[parent].first_child,
        }
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        assert!(self.is_live(id), "Node {} is not live", id);
        &self.data[id.index()].node
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        assert!(self.is_live(id), "Node {} is not live", id);
        &mut self.data[id.index()].node
    }
}

/// Iterator over a node's children. See [`Arena::children`].
pub struct Children<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena[current].next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        let a = arena.allocate(None, false);
        let b = arena.allocate(Some(Var::new(0)), true);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.size(), 2);
        assert_eq!(arena[b].label(), Some((Var::new(0), true)));
    }

    #[test]
    fn test_release_one_reuses_slot() {
        let mut arena = Arena::new();
        let a = arena.allocate(None, false);
        let b = arena.allocate(Some(Var::new(1)), false);
        arena.release_one(b);
        assert!(!arena.is_live(b));
        assert_eq!(arena.size(), 1);

        let c = arena.allocate(Some(Var::new(2)), true);
        assert_eq!(c, b);
        assert_eq!(arena.capacity(), 2);
        assert_eq!(arena.size(), 2);
        assert_eq!(arena[c].label(), Some((Var::new(2), true)));
        assert!(arena.is_live(a));
    }

    #[test]
    fn test_release_all() {
        let mut arena = Arena::with_capacity(8);
        let a = arena.allocate(None, false);
        arena.allocate(Some(Var::new(0)), true);
        arena.release_all();
        assert_eq!(arena.size(), 0);
        assert!(!arena.is_live(a));
    }

    #[test]
    #[should_panic(expected = "still has children")]
    fn test_release_with_children() {
        let mut arena = Arena::new();
        let parent = arena.allocate(None, false);
        let child = arena.allocate(Some(Var::new(0)), true);
        arena.attach(parent, None, child);
        arena.release_one(parent);
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_access_released() {
        let mut arena = Arena::new();
        let a = arena.allocate(None, false);
        arena.release_one(a);
        let _ = arena[a];
    }

    #[test]
    fn test_attach_links_back_references() {
        let mut arena = Arena::new();
        let parent = arena.allocate(None, false);
        let low = arena.allocate(Some(Var::new(0)), false);
        let high = arena.allocate(Some(Var::new(0)), true);
        arena.attach(parent, None, low);
        arena.attach(parent, Some(low), high);

        assert_eq!(arena.children(parent).collect::<Vec<_>>(), vec![low, high]);
        assert_eq!(arena[low].back, BackRef::Parent(parent));
        assert_eq!(arena[high].back, BackRef::PrevSibling(low));
    }

    #[test]
    fn test_attach_at_head_shifts_old_head() {
        let mut arena = Arena::new();
        let parent = arena.allocate(None, false);
        let second = arena.allocate(Some(Var::new(0)), true);
        let first = arena.allocate(Some(Var::new(0)), false);
        arena.attach(parent, None, second);
        arena.attach(parent, None, first);

        assert_eq!(arena.children(parent).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(arena[first].back, BackRef::Parent(parent));
        assert_eq!(arena[second].back, BackRef::PrevSibling(first));
    }
}
