//! A* Search
//!
//! Best-first search over a grid's cell adjacency. The frontier is a
//! min-heap on `g + h`; ties go to the lower `h`, then to the node pushed
//! first, so identical inputs always give identical paths.
//!
//! "No path" is a normal result, never an error: it covers unreachable
//! goals, impassable or missing endpoints and an exhausted expansion budget.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::request::PathRequest;
use crate::cell::CellCoord;
use crate::grid::Grid;

/// A found path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Coordinates from start to goal, both inclusive.
    pub cells: Vec<CellCoord>,
    /// Sum of step costs along the path.
    pub cost: f32,
    /// Nodes expanded while searching.
    pub expanded: usize,
}

impl Path {
    /// Number of steps (edges), one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    Found(Path),
    /// The frontier emptied without reaching the goal, or an endpoint is
    /// missing or impassable.
    NoPath { expanded: usize },
    /// `max_expansions` was reached first.
    ExpansionLimit { expanded: usize },
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn expanded(&self) -> usize {
        match self {
            PathResult::Found(path) => path.expanded,
            PathResult::NoPath { expanded } | PathResult::ExpansionLimit { expanded } => *expanded,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    h: f32,
    seq: u64,
    coord: CellCoord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Reusable search state.
///
/// Keeps its buffers between searches so repeated queries (for example one
/// per frame while hovering) don't reallocate.
#[derive(Debug, Default)]
pub struct Pathfinder {
    open: BinaryHeap<Reverse<OpenNode>>,
    g_score: HashMap<CellCoord, f32>,
    came_from: HashMap<CellCoord, CellCoord>,
    closed: HashSet<CellCoord>,
    seq: u64,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.open.clear();
        self.g_score.clear();
        self.came_from.clear();
        self.closed.clear();
        self.seq = 0;
    }

    fn push(&mut self, coord: CellCoord, g: f32, h: f32) {
        self.open.push(Reverse(OpenNode {
            f: g + h,
            h,
            seq: self.seq,
            coord,
        }));
        self.seq += 1;
    }

    /// Finds the cheapest path from `start` to `goal` over `grid`.
    pub fn find_path<T>(
        &mut self,
        grid: &Grid<T>,
        start: CellCoord,
        goal: CellCoord,
        request: &PathRequest<'_, T>,
    ) -> PathResult {
        self.reset();

        let (Some(start_cell), Some(goal_cell)) = (grid.cell_at(start), grid.cell_at(goal)) else {
            log::trace!("path {start} -> {goal}: endpoint not on grid");
            return PathResult::NoPath { expanded: 0 };
        };
        if !request.is_passable(start_cell) || !request.is_passable(goal_cell) {
            log::trace!("path {start} -> {goal}: endpoint impassable");
            return PathResult::NoPath { expanded: 0 };
        }
        if start == goal {
            return PathResult::Found(Path {
                cells: vec![start],
                cost: 0.0,
                expanded: 0,
            });
        }

        let shape = grid.shape();
        let options = request.options;
        let heuristic = |from: CellCoord| -> f32 {
            match request.custom_heuristic() {
                Some(h) => h(from, goal),
                None if options.allow_diagonals => {
                    shape.diagonal_distance(from, goal) as f32 * options.min_step_cost
                }
                None => shape.distance(from, goal) as f32 * options.min_step_cost,
            }
        };

        self.g_score.insert(start, 0.0);
        self.push(start, 0.0, heuristic(start));

        let mut expanded = 0usize;
        while let Some(Reverse(node)) = self.open.pop() {
            let current = node.coord;
            if current == goal {
                let path = self.reconstruct(goal, expanded);
                log::debug!(
                    "path {start} -> {goal}: {} steps, cost {}, {} expanded",
                    path.steps(),
                    path.cost,
                    expanded
                );
                return PathResult::Found(path);
            }
            if !self.closed.insert(current) {
                continue;
            }
            if options.max_expansions.is_some_and(|limit| expanded >= limit) {
                log::debug!("path {start} -> {goal}: expansion limit {expanded} reached");
                return PathResult::ExpansionLimit { expanded };
            }
            expanded += 1;

            let Some(current_cell) = grid.cell_at(current) else {
                continue;
            };
            let current_g = self.g_score.get(&current).copied().unwrap_or(f32::INFINITY);

            for next in grid.neighbor_coords(current, options.allow_diagonals) {
                if self.closed.contains(&next) {
                    continue;
                }
                let Some(next_cell) = grid.cell_at(next) else {
                    continue;
                };
                if !request.is_passable(next_cell) {
                    continue;
                }
                let step = request.step_cost(current_cell, next_cell);
                if step.is_nan() || step < 0.0 {
                    continue;
                }

                let tentative = current_g + step;
                let known = self.g_score.get(&next).copied().unwrap_or(f32::INFINITY);
                if tentative < known {
                    self.g_score.insert(next, tentative);
                    self.came_from.insert(next, current);
                    self.push(next, tentative, heuristic(next));
                }
            }
        }

        log::debug!("path {start} -> {goal}: unreachable after {expanded} expanded");
        PathResult::NoPath { expanded }
    }

    fn reconstruct(&self, goal: CellCoord, expanded: usize) -> Path {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(&prev) = self.came_from.get(&current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();

        Path {
            cells,
            cost: self.g_score.get(&goal).copied().unwrap_or(0.0),
            expanded,
        }
    }
}

/// One-off search with a fresh [`Pathfinder`].
pub fn find_path<T>(
    grid: &Grid<T>,
    start: CellCoord,
    goal: CellCoord,
    request: &PathRequest<'_, T>,
) -> PathResult {
    Pathfinder::new().find_path(grid, start, goal, request)
}
