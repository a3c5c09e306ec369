use std::{collections::BTreeSet, fmt::Debug, hash::Hash};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::MazeError,
    frontier::Frontier,
    node::{NodeId, SearchNode},
};

/// Supertrait that collects all the requirements on the NodeReference values
/// Must be copy, comparable, hashable and not references (hence 'static)
pub trait NodeReference: Copy + Eq + Ord + Hash + Debug + 'static {}

pub trait MapTrait {
    /// The type that can be used to reference nodes in the map
    type Reference: NodeReference;

    /// The move that takes the search from one node to one of its neighbors
    type Action: Copy + Debug + 'static;

    /// Return an iterator over the reachable neighbors of the provided node, in a fixed order
    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)>;
}

/// Estimates the remaining cost from a node to the goal
pub trait Heuristic<R> {
    fn estimate(&self, node: R, goal: R) -> usize;
}

/// Always estimates zero, used for the uninformed search
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHeuristic;

impl<R> Heuristic<R> for NoHeuristic {
    fn estimate(&self, _node: R, _goal: R) -> usize {
        0
    }
}

impl<R, H: Heuristic<R> + ?Sized> Heuristic<R> for Box<H> {
    fn estimate(&self, node: R, goal: R) -> usize {
        (**self).estimate(node, goal)
    }
}

/// The moves from the start to the goal, the start itself is not included
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Solution<R, A> {
    pub steps: Vec<(A, R)>,
}

impl<R: Copy, A: Copy> Solution<R, A> {
    pub fn actions(&self) -> Vec<A> {
        self.steps.iter().map(|(action, _)| *action).collect()
    }

    pub fn cells(&self) -> Vec<R> {
        self.steps.iter().map(|(_, state)| *state).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Everything a successful search leaves behind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport<R: Ord, A> {
    pub solution: Solution<R, A>,
    pub explored: BTreeSet<R>,
    pub num_explored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState<R, A> {
    Computing,
    NoPathFound,
    PathFound(Solution<R, A>),
}

impl<R, A> PathFinderState<R, A> {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Graph search that can be advanced one expansion at a time.
///
/// The exploration order is decided entirely by the frontier `F`, the heuristic `H` only
/// feeds the estimate stored on each node.
pub struct PathFinder<M: MapTrait, F, H> {
    start: M::Reference,
    goal: M::Reference,
    frontier: F,
    heuristic: H,
    // every node that was taken out of the frontier, parents are referenced by index
    nodes: Vec<SearchNode<M::Reference, M::Action>>,
    explored: BTreeSet<M::Reference>,
    num_explored: usize,
    state: PathFinderState<M::Reference, M::Action>,
    _map: std::marker::PhantomData<M>,
}

impl<M, F, H> PathFinder<M, F, H>
where
    M: MapTrait,
    F: Frontier<M::Reference, M::Action>,
    H: Heuristic<M::Reference>,
{
    pub fn new(start: M::Reference, goal: M::Reference, mut frontier: F, heuristic: H) -> Self {
        frontier.add(SearchNode::root(start, heuristic.estimate(start, goal)));

        Self {
            start,
            goal,
            frontier,
            heuristic,
            nodes: Vec::new(),
            explored: BTreeSet::new(),
            num_explored: 0,
            state: PathFinderState::Computing,
            _map: std::marker::PhantomData,
        }
    }

    /// Run the search until it either reaches the goal or runs out of nodes
    pub fn finish(mut self, map: &M) -> Result<SearchReport<M::Reference, M::Action>, MazeError> {
        loop {
            match self.step(map)? {
                PathFinderState::Computing => {}
                PathFinderState::NoPathFound => return Err(MazeError::NoSolution),
                PathFinderState::PathFound(solution) => {
                    return Ok(SearchReport {
                        solution,
                        explored: self.explored,
                        num_explored: self.num_explored,
                    })
                }
            }
        }
    }

    /// Expand a single node
    pub fn step(&mut self, map: &M) -> Result<PathFinderState<M::Reference, M::Action>, MazeError> {
        if self.state.is_done() {
            return Ok(self.state.clone());
        }

        if self.frontier.is_empty() {
            debug!(
                "frontier exhausted after exploring {} states",
                self.num_explored
            );
            self.state = PathFinderState::NoPathFound;
            return Ok(self.state.clone());
        }

        let node = self.frontier.remove()?;
        self.num_explored += 1;

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);

        if node.state == self.goal {
            let solution = self.backtrack(id);
            debug!(
                "found goal {:?}: {} steps, {} states explored",
                self.goal,
                solution.len(),
                self.num_explored
            );
            self.state = PathFinderState::PathFound(solution);
            return Ok(self.state.clone());
        }

        self.explored.insert(node.state);

        for (action, state) in map.neighbors_of(node.state) {
            if !self.frontier.contains_state(&state) && !self.explored.contains(&state) {
                self.frontier.add(SearchNode {
                    state,
                    parent: Some(id),
                    action: Some(action),
                    cost: node.cost + 1,
                    heuristic: self.heuristic.estimate(state, self.goal),
                });
            }
        }

        Ok(self.state.clone())
    }

    /// Follow the parent links from the given node back to the root
    fn backtrack(&self, from: NodeId) -> Solution<M::Reference, M::Action> {
        let mut steps = Vec::new();
        let mut current = &self.nodes[from.index()];

        while let (Some(parent), Some(action)) = (current.parent, current.action) {
            steps.push((action, current.state));
            current = &self.nodes[parent.index()];
        }

        steps.reverse();
        Solution { steps }
    }

    pub fn state(&self) -> &PathFinderState<M::Reference, M::Action> {
        &self.state
    }

    pub fn explored(&self) -> &BTreeSet<M::Reference> {
        &self.explored
    }

    pub fn num_explored(&self) -> usize {
        self.num_explored
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn start(&self) -> M::Reference {
        self.start
    }

    pub fn goal(&self) -> M::Reference {
        self.goal
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frontier::{PriorityFrontier, StackFrontier};

    /// A line of numbered nodes where every node is connected to its direct neighbors
    struct Line {
        len: u32,
        blocked: Option<u32>,
    }

    impl NodeReference for u32 {}

    impl MapTrait for Line {
        type Reference = u32;
        type Action = i8;

        fn neighbors_of(&self, node: u32) -> impl Iterator<Item = (i8, u32)> {
            let mut points = Vec::with_capacity(2);
            if node > 0 {
                points.push((-1, node - 1));
            }
            if node + 1 < self.len {
                points.push((1, node + 1));
            }
            points.retain(|(_, p)| Some(*p) != self.blocked);
            points.into_iter()
        }
    }

    struct Distance;

    impl Heuristic<u32> for Distance {
        fn estimate(&self, node: u32, goal: u32) -> usize {
            node.abs_diff(goal) as usize
        }
    }

    #[test]
    fn test_basic_route() {
        let map = Line {
            len: 6,
            blocked: None,
        };

        let report = PathFinder::<Line, _, _>::new(2, 5, StackFrontier::new(), NoHeuristic)
            .finish(&map)
            .unwrap();

        assert_eq!(report.solution.cells(), vec![3, 4, 5]);
        assert_eq!(report.solution.actions(), vec![1, 1, 1]);
        assert_eq!(report.num_explored, report.explored.len() + 1);
    }

    #[test]
    fn test_basic_no_route() {
        let map = Line {
            len: 6,
            blocked: Some(3),
        };

        let finder = PathFinder::<Line, _, _>::new(1, 5, PriorityFrontier::new(), Distance);
        assert!(matches!(finder.finish(&map), Err(MazeError::NoSolution)));
    }

    #[test]
    fn test_start_is_goal() {
        let map = Line {
            len: 3,
            blocked: None,
        };

        let report = PathFinder::<Line, _, _>::new(1, 1, StackFrontier::new(), NoHeuristic)
            .finish(&map)
            .unwrap();

        assert!(report.solution.is_empty());
        assert_eq!(report.num_explored, 1);
        assert!(report.explored.is_empty());
    }

    #[test]
    fn test_step_by_step() {
        let map = Line {
            len: 4,
            blocked: None,
        };

        let mut finder: PathFinder<Line, _, _> =
            PathFinder::new(0, 3, PriorityFrontier::new(), Distance);
        assert_eq!(finder.frontier_len(), 1);

        for expected in 1..=3 {
            assert_eq!(finder.step(&map).unwrap(), PathFinderState::Computing);
            assert_eq!(finder.num_explored(), expected);
            assert!(finder.explored().contains(&(expected as u32 - 1)));
        }

        let done = finder.step(&map).unwrap();
        assert!(matches!(&done, PathFinderState::PathFound(s) if s.cells() == vec![1, 2, 3]));

        // stepping a finished search does not change anything
        assert_eq!(finder.step(&map).unwrap(), done);
        assert_eq!(finder.num_explored(), 4);
        assert_eq!(finder.start(), 0);
        assert_eq!(finder.goal(), 3);
    }
}
