use crate::{
    algorithm::Algorithm,
    cost_matrix::CostMatrix,
    genetic::{self, GeneticParams},
    mst,
    route::OptimalRoute,
};

/// Runs the selected TSP algorithm over the matrix. Always returns a
/// tour anchored at stop 0.
pub fn optimal_route(algorithm: Algorithm, matrix: &CostMatrix) -> OptimalRoute {
    match algorithm {
        Algorithm::Mst => mst::optimal_route(matrix),
        Algorithm::Genetic => genetic::optimal_route(matrix, &GeneticParams::default()),
    }
}
