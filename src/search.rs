use {
    crate::heap::KeyedMinHeap,
    bitvec::prelude::*,
    num::{Bounded, Zero},
    std::ops::Add,
};

pub struct DijkstraState<C> {
    queue: KeyedMinHeap<C>,
    visited: BitVec,
    neighbors: Vec<(usize, C)>,
}

impl<C: Ord> DijkstraState<C> {
    fn clear(&mut self, vertex_count: usize) {
        self.queue.clear_for_key_count(vertex_count);
        self.visited.clear();
        self.visited.resize(vertex_count, false);
        self.neighbors.clear();
    }
}

impl<C: Ord> Default for DijkstraState<C> {
    fn default() -> Self {
        Self {
            queue: Default::default(),
            visited: Default::default(),
            neighbors: Default::default(),
        }
    }
}

/// An implementation of https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm over densely-indexed
/// vertices, computing the final cost of *every* vertex rather than racing toward a single end.
///
/// The whole vertex set is seeded into a [`KeyedMinHeap`] up front (the start at
/// `Cost::zero()`, everything else at `Cost::max_value()`), and relaxation goes through
/// [`KeyedMinHeap::update_cost`] instead of pushing stale duplicate entries. The loop
/// terminates because the queue strictly shrinks by one on every pop and is never refilled.
///
/// All edge costs must be non-negative: at the moment a vertex is popped, its cost is final.
pub trait DenseDijkstra {
    type Cost: Add<Self::Cost, Output = Self::Cost> + Bounded + Clone + Ord + Zero;

    fn vertex_count(&self) -> usize;
    fn start(&self) -> usize;

    /// Appends `(vertex index, edge cost)` pairs for each neighbor of `vertex`. The buffer is
    /// drained by the caller between invocations.
    fn neighbors(&self, vertex: usize, neighbors: &mut Vec<(usize, Self::Cost)>);

    fn cost_from_start(&self, vertex: usize) -> Self::Cost;
    fn update_vertex(&mut self, vertex: usize, cost: Self::Cost);

    /// Restores every vertex's cost to `Cost::max_value()`.
    fn reset(&mut self);

    fn run_internal(&mut self, state: &mut DijkstraState<Self::Cost>) {
        self.reset();

        let vertex_count: usize = self.vertex_count();

        state.clear(vertex_count);

        if vertex_count == 0_usize {
            return;
        }

        self.update_vertex(self.start(), Self::Cost::zero());

        for vertex in 0_usize..vertex_count {
            state.queue.push(vertex, self.cost_from_start(vertex));
        }

        while let Some((current, current_cost)) = state.queue.pop_min() {
            state.visited.set(current, true);

            if current_cost == Self::Cost::max_value() {
                // `current` is unreachable from the start, and so is everything left in the
                // queue. Relaxing from the sentinel cost would overflow.
                continue;
            }

            self.neighbors(current, &mut state.neighbors);

            for (neighbor, edge_cost) in state.neighbors.drain(..) {
                if state.visited[neighbor] {
                    continue;
                }

                let candidate: Self::Cost = current_cost.clone() + edge_cost;

                if candidate < self.cost_from_start(neighbor) {
                    self.update_vertex(neighbor, candidate.clone());
                    state.queue.update_cost(neighbor, candidate);
                }
            }
        }
    }

    fn run(&mut self) {
        self.run_internal(&mut DijkstraState::default());
    }
}
