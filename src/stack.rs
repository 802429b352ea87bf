//! Stack: LIFO adapter over `List`. The top is the list head, so both ends
//! of the contract are O(1).

use crate::list::List;

#[derive(Debug)]
pub struct Stack<T> {
    list: List<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_front(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
