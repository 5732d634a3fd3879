//! Path requests: passability, step cost, heuristic and search limits.

use crate::cell::{Cell, CellCoord};

type Passable<'a, T> = Box<dyn Fn(&Cell<T>) -> bool + 'a>;
type StepCost<'a, T> = Box<dyn Fn(&Cell<T>, &Cell<T>) -> f32 + 'a>;
type Heuristic<'a> = Box<dyn Fn(CellCoord, CellCoord) -> f32 + 'a>;

/// Search options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOptions {
    /// Also step through the shape's diagonal offsets.
    pub allow_diagonals: bool,
    /// Give up after expanding this many nodes. `None` searches until the
    /// frontier is empty.
    pub max_expansions: Option<usize>,
    /// Smallest value the cost function can return for one step. Scales the
    /// default heuristic; set it to 0 to turn the search into Dijkstra.
    pub min_step_cost: f32,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            allow_diagonals: false,
            max_expansions: None,
            min_step_cost: 1.0,
        }
    }
}

/// Caller-supplied rules for one search.
///
/// Defaults: a cell is passable when [`Cell::walkable`] is set, every step
/// costs 1, and the heuristic is the shape distance times
/// [`PathOptions::min_step_cost`].
///
/// ```
/// use tilegrid::pathfinding::PathRequest;
///
/// let request = PathRequest::<()>::new()
///     .with_cost(|_, to| if to.coord().q == 0 { 5.0 } else { 1.0 })
///     .with_max_expansions(500);
/// assert_eq!(request.options.max_expansions, Some(500));
/// ```
pub struct PathRequest<'a, T> {
    passable: Passable<'a, T>,
    cost: StepCost<'a, T>,
    heuristic: Option<Heuristic<'a>>,
    pub options: PathOptions,
}

impl<T> Default for PathRequest<'_, T> {
    fn default() -> Self {
        Self {
            passable: Box::new(|cell: &Cell<T>| cell.walkable),
            cost: Box::new(|_: &Cell<T>, _: &Cell<T>| 1.0),
            heuristic: None,
            options: PathOptions::default(),
        }
    }
}

impl<'a, T> PathRequest<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the passability predicate. The default `walkable` check is
    /// not applied on top of it.
    pub fn with_passable(mut self, passable: impl Fn(&Cell<T>) -> bool + 'a) -> Self {
        self.passable = Box::new(passable);
        self
    }

    /// Cost of stepping `from -> to`. Must be `>= 0`; negative or NaN costs
    /// make that step unusable.
    pub fn with_cost(mut self, cost: impl Fn(&Cell<T>, &Cell<T>) -> f32 + 'a) -> Self {
        self.cost = Box::new(cost);
        self
    }

    /// Estimated remaining cost `(from, goal)`. Must never overestimate for
    /// the returned path to be optimal.
    pub fn with_heuristic(mut self, heuristic: impl Fn(CellCoord, CellCoord) -> f32 + 'a) -> Self {
        self.heuristic = Some(Box::new(heuristic));
        self
    }

    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_diagonals(mut self, allow: bool) -> Self {
        self.options.allow_diagonals = allow;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.options.max_expansions = Some(limit);
        self
    }

    pub fn with_min_step_cost(mut self, min_step_cost: f32) -> Self {
        self.options.min_step_cost = min_step_cost;
        self
    }

    pub(crate) fn is_passable(&self, cell: &Cell<T>) -> bool {
        (self.passable)(cell)
    }

    pub(crate) fn step_cost(&self, from: &Cell<T>, to: &Cell<T>) -> f32 {
        (self.cost)(from, to)
    }

    pub(crate) fn custom_heuristic(&self) -> Option<&Heuristic<'a>> {
        self.heuristic.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellShape;

    #[test]
    fn test_defaults() {
        let request: PathRequest<'_, ()> = PathRequest::new();
        let mut cell = Cell::new(CellCoord::ORIGIN, CellShape::Hex, 1.0);
        assert!(request.is_passable(&cell));
        cell.walkable = false;
        assert!(!request.is_passable(&cell));
        assert_eq!(request.step_cost(&cell, &cell), 1.0);
        assert!(request.custom_heuristic().is_none());
        assert_eq!(request.options, PathOptions::default());
    }

    #[test]
    fn test_builder_chain() {
        let request: PathRequest<'_, ()> = PathRequest::new()
            .with_passable(|_| true)
            .with_diagonals(true)
            .with_min_step_cost(0.5)
            .with_heuristic(|_, _| 0.0);
        let mut cell = Cell::new(CellCoord::ORIGIN, CellShape::Square, 1.0);
        cell.walkable = false;
        assert!(request.is_passable(&cell));
        assert!(request.options.allow_diagonals);
        assert_eq!(request.options.min_step_cost, 0.5);
        assert!(request.custom_heuristic().is_some());
    }
}
