//! List: singly linked node chain with O(1) head and tail access.
//!
//! Nodes live in a generational arena; links are arena keys rather than
//! pointers, so the tail link is a plain key and needs no aliasing.

use crate::error::ListError;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
}

pub struct List<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, k: DefaultKey) -> &Node<T> {
        self.nodes
            .get(k)
            .expect("list link must point at a live node")
    }

    fn node_mut(&mut self, k: DefaultKey) -> &mut Node<T> {
        self.nodes
            .get_mut(k)
            .expect("list link must point at a live node")
    }

    /// Key of the node at `index`; callers bound-check first.
    fn key_at(&self, index: usize) -> DefaultKey {
        let mut cur = self.head.expect("index checked against len");
        for _ in 0..index {
            cur = self.node(cur).next.expect("index checked against len");
        }
        cur
    }

    pub fn push_back(&mut self, value: T) {
        let k = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(t) => self.node_mut(t).next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    pub fn push_front(&mut self, value: T) {
        let k = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(k);
        if self.tail.is_none() {
            self.tail = Some(k);
        }
    }

    /// Inserts so that `value` ends up at `index`; `index == len` appends.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        if index == 0 {
            self.push_front(value);
        } else if index == len {
            self.push_back(value);
        } else {
            let prev = self.key_at(index - 1);
            let next = self.node(prev).next;
            let k = self.nodes.insert(Node { value, next });
            self.node_mut(prev).next = Some(k);
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        Some(&self.node(self.key_at(index)).value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.node(k).value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.node(k).value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let k = self.head?;
        let node = self.nodes.remove(k).expect("head must be a live node");
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(node.value)
    }

    /// Unlinks the node after `prev` (or the head when `prev` is `None`).
    fn unlink_after(&mut self, prev: Option<DefaultKey>) -> T {
        let k = match prev {
            None => self.head.expect("unlink from non-empty list"),
            Some(p) => self.node(p).next.expect("unlink target must exist"),
        };
        let node = self.nodes.remove(k).expect("linked node must be live");
        match prev {
            None => self.head = node.next,
            Some(p) => self.node_mut(p).next = node.next,
        }
        if self.tail == Some(k) {
            self.tail = prev;
        }
        node.value
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        let prev = if index == 0 {
            None
        } else {
            Some(self.key_at(index - 1))
        };
        Some(self.unlink_after(prev))
    }

    /// Visits elements front to back until `visitor` returns `false`.
    /// Returns the number of calls, including the one that stopped the walk.
    pub fn for_each_while<F>(&self, mut visitor: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut calls = 0;
        for v in self.iter() {
            calls += 1;
            if !visitor(v) {
                break;
            }
        }
        calls
    }

    pub fn find<P>(&self, mut pred: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|v| pred(*v))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cur: self.head,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }
}

impl<T: PartialEq> List<T> {
    pub fn position(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Removes and returns the first element equal to `value`.
    pub fn remove_item(&mut self, value: &T) -> Option<T> {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.node(k);
            if node.value == *value {
                return Some(self.unlink_after(prev));
            }
            prev = Some(k);
            cur = node.next;
        }
        None
    }
}

/// Front-to-back iterator over a `List`.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    cur: Option<DefaultKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cur?);
        self.cur = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
