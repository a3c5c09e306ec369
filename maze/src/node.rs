use serde::{Deserialize, Serialize};

/// Index of an expanded node inside the [`crate::PathFinder`] arena
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One step of the search tree.
///
/// Only the child -> parent link is stored; the parent is always a node that has already
/// been expanded, so it lives in the arena and can be referenced by index.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchNode<R, A> {
    pub state: R,
    pub parent: Option<NodeId>,
    /// the action taken in the parent to get here (None for the root)
    pub action: Option<A>,
    pub cost: usize,
    pub heuristic: usize,
}

impl<R, A> SearchNode<R, A> {
    pub fn root(state: R, heuristic: usize) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            cost: 0,
            heuristic,
        }
    }

    /// accumulated cost plus the estimated remaining cost
    pub fn f_cost(&self) -> usize {
        self.cost.saturating_add(self.heuristic)
    }
}
