//! Bst: unbalanced binary search tree ordered by a caller-supplied
//! comparator.
//!
//! Equal elements are inserted into the right subtree. Removing a node with
//! two children replaces it with its in-order predecessor (the largest
//! element of the left subtree).

use core::cmp::Ordering;
use core::fmt;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
        })
    }
}

/// Visit order for `Bst::traverse` and `Bst::to_vec`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Traversal {
    PreOrder,
    InOrder,
    PostOrder,
}

pub struct Bst<T, C> {
    root: Link<T>,
    len: usize,
    cmp: C,
}

impl<T: Ord> Bst<T, fn(&T, &T) -> Ordering> {
    /// Tree ordered by `T: Ord`.
    pub fn ordered() -> Self {
        Self::new(T::cmp)
    }
}

impl<T, C> Bst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, value: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match (self.cmp)(&value, &node.value) {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
        *link = Some(Node::leaf(value));
        self.len += 1;
    }

    /// First element comparing equal to `probe` on the search path.
    pub fn get(&self, probe: &T) -> Option<&T> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match (self.cmp)(probe, &node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    pub fn contains(&self, probe: &T) -> bool {
        self.get(probe).is_some()
    }

    /// Removes and returns the first element comparing equal to `probe`.
    pub fn remove(&mut self, probe: &T) -> Option<T> {
        let removed = remove_from(&mut self.root, probe, &self.cmp);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Calls `visitor` in `order` until it returns `false`. Returns the number
    /// of calls, including the one that stopped the walk.
    pub fn traverse<F>(&self, order: Traversal, mut visitor: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut calls = 0;
        walk(&self.root, order, &mut |v| {
            calls += 1;
            visitor(v)
        });
        calls
    }

    /// Up to `limit` elements in `order`.
    pub fn to_vec(&self, order: Traversal, limit: usize) -> Vec<&T> {
        let mut out = Vec::with_capacity(limit.min(self.len));
        if limit == 0 {
            return out;
        }
        walk(&self.root, order, &mut |v| {
            out.push(v);
            out.len() < limit
        });
        out
    }

    /// Consumes the tree, handing every element to `destructor` in post-order.
    pub fn destroy_with<F>(mut self, mut destructor: F)
    where
        F: FnMut(T),
    {
        let mut stack: Vec<(Box<Node<T>>, bool)> = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push((root, false));
        }
        while let Some((mut node, expanded)) = stack.pop() {
            if expanded {
                destructor(node.value);
                continue;
            }
            let left = node.left.take();
            let right = node.right.take();
            stack.push((node, true));
            stack.extend(right.map(|n| (n, false)));
            stack.extend(left.map(|n| (n, false)));
        }
        self.len = 0;
    }
}

fn remove_from<T, C>(link: &mut Link<T>, probe: &T, cmp: &C) -> Option<T>
where
    C: Fn(&T, &T) -> Ordering,
{
    let node = link.as_mut()?;
    match cmp(probe, &node.value) {
        Ordering::Less => remove_from(&mut node.left, probe, cmp),
        Ordering::Greater => remove_from(&mut node.right, probe, cmp),
        Ordering::Equal => {
            let mut node = link.take()?;
            *link = match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (predecessor, rest) = take_max(left);
                    Some(Box::new(Node {
                        value: predecessor,
                        left: rest,
                        right: Some(right),
                    }))
                }
            };
            Some(node.value)
        }
    }
}

/// Detaches the largest element of the subtree, returning it with what is
/// left of the subtree.
fn take_max<T>(mut node: Box<Node<T>>) -> (T, Link<T>) {
    match node.right.take() {
        None => {
            let Node { value, left, .. } = *node;
            (value, left)
        }
        Some(right) => {
            let (max, rest) = take_max(right);
            node.right = rest;
            (max, Some(node))
        }
    }
}

/// Returns `false` once `visit` asked to stop.
fn walk<'a, T, F>(link: &'a Link<T>, order: Traversal, visit: &mut F) -> bool
where
    F: FnMut(&'a T) -> bool,
{
    let Some(node) = link else {
        return true;
    };
    if order == Traversal::PreOrder && !visit(&node.value) {
        return false;
    }
    if !walk(&node.left, order, visit) {
        return false;
    }
    if order == Traversal::InOrder && !visit(&node.value) {
        return false;
    }
    if !walk(&node.right, order, visit) {
        return false;
    }
    if order == Traversal::PostOrder && !visit(&node.value) {
        return false;
    }
    true
}

impl<T, C> Drop for Bst<T, C> {
    fn drop(&mut self) {
        // Unlink iteratively; a list-shaped tree would otherwise recurse once
        // per node in Box's drop glue.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Bst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.to_vec(Traversal::InOrder, self.len))
            .finish()
    }
}
