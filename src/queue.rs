//! Queue: FIFO adapter over `List`; enqueue at the tail, dequeue at the head.

use crate::list::List;

#[derive(Debug)]
pub struct Queue<T> {
    list: List<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    pub fn enqueue(&mut self, value: T) {
        self.list.push_back(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
