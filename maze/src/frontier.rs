use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
    hash::Hash,
};

use crate::{error::MazeError, node::SearchNode};

/// The set of nodes that have been discovered but not yet expanded.
///
/// Implementations only differ in the order in which [`Frontier::remove`] hands out nodes.
pub trait Frontier<R, A> {
    fn add(&mut self, node: SearchNode<R, A>);

    /// Check if a node with the given state is waiting in the frontier
    fn contains_state(&self, state: &R) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the next node to expand out of the frontier
    fn remove(&mut self) -> Result<SearchNode<R, A>, MazeError>;
}

impl<R, A, F: Frontier<R, A> + ?Sized> Frontier<R, A> for Box<F> {
    fn add(&mut self, node: SearchNode<R, A>) {
        (**self).add(node)
    }

    fn contains_state(&self, state: &R) -> bool {
        (**self).contains_state(state)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn remove(&mut self) -> Result<SearchNode<R, A>, MazeError> {
        (**self).remove()
    }
}

/// Counts how many frontier entries there are per state, so that membership checks do not
/// have to scan the whole frontier
#[derive(Debug)]
struct StateIndex<R>(HashMap<R, usize>);

impl<R: Hash + Eq> StateIndex<R> {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn insert(&mut self, state: R) {
        *self.0.entry(state).or_insert(0) += 1;
    }

    fn remove(&mut self, state: &R) {
        if let Some(count) = self.0.get_mut(state) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(state);
            }
        }
    }

    fn contains(&self, state: &R) -> bool {
        self.0.contains_key(state)
    }
}

/// Last-in-first-out frontier, turns the search into a depth-first search
#[derive(Debug)]
pub struct StackFrontier<R, A> {
    nodes: Vec<SearchNode<R, A>>,
    index: StateIndex<R>,
}

impl<R: Copy + Hash + Eq, A> StackFrontier<R, A> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: StateIndex::new(),
        }
    }
}

impl<R: Copy + Hash + Eq, A> Default for StackFrontier<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Hash + Eq, A> Frontier<R, A> for StackFrontier<R, A> {
    fn add(&mut self, node: SearchNode<R, A>) {
        self.index.insert(node.state);
        self.nodes.push(node);
    }

    fn contains_state(&self, state: &R) -> bool {
        self.index.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<SearchNode<R, A>, MazeError> {
        let node = self.nodes.pop().ok_or(MazeError::EmptyFrontier)?;
        self.index.remove(&node.state);
        Ok(node)
    }
}

/// The ordering key of the priority frontier: lowest `f_cost` first, ties go to the node
/// that was added first
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct FrontierKey {
    f_cost: usize,
    order: u64,
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit<R, A> {
    key: Reverse<FrontierKey>, // reverse for BinaryHeap to be a min-heap
    node: SearchNode<R, A>,
}

impl<R, A> Ord for ToVisit<R, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<R, A> PartialOrd for ToVisit<R, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R, A> PartialEq for ToVisit<R, A> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<R, A> Eq for ToVisit<R, A> {}

/// Min-heap frontier ordered by `cost + heuristic`, used for A*
#[derive(Debug)]
pub struct PriorityFrontier<R, A> {
    heap: BinaryHeap<ToVisit<R, A>>,
    index: StateIndex<R>,
    next_order: u64,
}

impl<R: Copy + Hash + Eq, A> PriorityFrontier<R, A> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            index: StateIndex::new(),
            next_order: 0,
        }
    }
}

impl<R: Copy + Hash + Eq, A> Default for PriorityFrontier<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Hash + Eq, A> Frontier<R, A> for PriorityFrontier<R, A> {
    fn add(&mut self, node: SearchNode<R, A>) {
        let key = FrontierKey {
            f_cost: node.f_cost(),
            order: self.next_order,
        };
        self.next_order += 1;

        self.index.insert(node.state);
        self.heap.push(ToVisit {
            key: Reverse(key),
            node,
        });
    }

    fn contains_state(&self, state: &R) -> bool {
        self.index.contains(state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn remove(&mut self) -> Result<SearchNode<R, A>, MazeError> {
        let visit = self.heap.pop().ok_or(MazeError::EmptyFrontier)?;
        self.index.remove(&visit.node.state);
        Ok(visit.node)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn node(state: u32, cost: usize, heuristic: usize) -> SearchNode<u32, ()> {
        SearchNode {
            state,
            parent: None,
            action: None,
            cost,
            heuristic,
        }
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut frontier: StackFrontier<u32, ()> = StackFrontier::new();
        frontier.add(node(1, 0, 0));
        frontier.add(node(2, 0, 0));
        frontier.add(node(3, 0, 0));

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.remove().unwrap().state, 3);
        assert_eq!(frontier.remove().unwrap().state, 2);
        assert_eq!(frontier.remove().unwrap().state, 1);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_priority_pops_lowest_f_cost() {
        let mut frontier: PriorityFrontier<u32, ()> = PriorityFrontier::new();
        frontier.add(node(1, 4, 6));
        frontier.add(node(2, 1, 2));
        frontier.add(node(3, 5, 0));

        assert_eq!(frontier.remove().unwrap().state, 2);
        assert_eq!(frontier.remove().unwrap().state, 3);
        assert_eq!(frontier.remove().unwrap().state, 1);
    }

    #[test]
    fn test_priority_ties_broken_by_insertion_order() {
        let mut frontier: PriorityFrontier<u32, ()> = PriorityFrontier::new();
        frontier.add(node(10, 2, 2));
        frontier.add(node(11, 3, 1));
        frontier.add(node(12, 1, 0));
        frontier.add(node(13, 0, 4));

        assert_eq!(frontier.remove().unwrap().state, 12);
        assert_eq!(frontier.remove().unwrap().state, 10);
        assert_eq!(frontier.remove().unwrap().state, 11);
        assert_eq!(frontier.remove().unwrap().state, 13);
    }

    #[test]
    fn test_contains_state_follows_add_and_remove() {
        let mut stack: StackFrontier<u32, ()> = StackFrontier::new();
        let mut heap: PriorityFrontier<u32, ()> = PriorityFrontier::new();

        let frontiers: [&mut dyn Frontier<u32, ()>; 2] = [&mut stack, &mut heap];
        for frontier in frontiers {
            assert!(!frontier.contains_state(&7));
            frontier.add(node(7, 0, 0));
            assert!(frontier.contains_state(&7));
            assert!(!frontier.contains_state(&8));
            frontier.remove().unwrap();
            assert!(!frontier.contains_state(&7));
        }
    }

    #[test]
    fn test_duplicate_states_are_tracked_separately() {
        let mut frontier: StackFrontier<u32, ()> = StackFrontier::new();
        frontier.add(node(5, 0, 0));
        frontier.add(node(5, 1, 0));

        frontier.remove().unwrap();
        assert!(frontier.contains_state(&5));
        frontier.remove().unwrap();
        assert!(!frontier.contains_state(&5));
    }

    #[test]
    fn test_remove_from_empty_frontier() {
        let mut stack: StackFrontier<u32, ()> = StackFrontier::new();
        assert!(matches!(stack.remove(), Err(MazeError::EmptyFrontier)));

        let mut heap: PriorityFrontier<u32, ()> = PriorityFrontier::new();
        assert!(matches!(heap.remove(), Err(MazeError::EmptyFrontier)));
    }

    #[test]
    fn test_boxed_frontier_delegates() {
        let mut frontier: Box<dyn Frontier<u32, ()>> = Box::new(StackFrontier::new());
        frontier.add(node(1, 0, 0));
        frontier.add(node(2, 0, 0));
        assert_eq!(frontier.len(), 2);
        assert!(frontier.contains_state(&1));
        assert_eq!(frontier.remove().unwrap().state, 2);
    }
}
