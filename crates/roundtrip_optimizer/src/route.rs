use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("route has {got} stops, expected {expected}")]
    WrongLength { got: usize, expected: usize },

    #[error("route is not a permutation: stop index {0} is repeated or out of range")]
    NotAPermutation(usize),
}

/// A visiting order over stop indices `0..n`, excluding the implicit
/// return to the first stop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimalRoute(Vec<usize>);

impl OptimalRoute {
    /// Accepts `order` only if it is a permutation of `0..num_dests`.
    pub fn new(order: Vec<usize>, num_dests: usize) -> Result<Self, RouteError> {
        if order.len() != num_dests {
            return Err(RouteError::WrongLength {
                got: order.len(),
                expected: num_dests,
            });
        }

        let mut seen = vec![false; num_dests];
        for &stop in &order {
            if stop >= num_dests || seen[stop] {
                return Err(RouteError::NotAPermutation(stop));
            }
            seen[stop] = true;
        }

        Ok(Self(order))
    }

    /// Solver-internal constructor; solvers produce permutations by
    /// construction.
    pub(crate) fn from_order(order: Vec<usize>) -> Self {
        Self(order)
    }

    pub fn order(&self) -> &[usize] {
        &self.0
    }

    pub fn into_order(self) -> Vec<usize> {
        self.0
    }

    /// Reorders `items` by this route: element `i` of the result is
    /// `items[route[i]]`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.0.iter().map(|&index| &items[index]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_permutation() {
        let route = OptimalRoute::new(vec![0, 2, 1], 3).unwrap();
        assert_eq!(route.order(), &[0, 2, 1]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let error = OptimalRoute::new(vec![0, 1], 3).unwrap_err();
        assert_eq!(error, RouteError::WrongLength { got: 2, expected: 3 });
    }

    #[test]
    fn test_rejects_repeated_stop() {
        let error = OptimalRoute::new(vec![0, 1, 1], 3).unwrap_err();
        assert_eq!(error, RouteError::NotAPermutation(1));
    }

    #[test]
    fn test_rejects_out_of_range_stop() {
        let error = OptimalRoute::new(vec![0, 1, 3], 3).unwrap_err();
        assert_eq!(error, RouteError::NotAPermutation(3));
    }

    #[test]
    fn test_apply_reorders_items() {
        let route = OptimalRoute::new(vec![0, 2, 1], 3).unwrap();
        let items = ["a", "b", "c"];
        assert_eq!(route.apply(&items), vec![&"a", &"c", &"b"]);
    }
}
