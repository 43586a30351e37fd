use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::debug;

use crate::{cost_matrix::CostMatrix, route::OptimalRoute};

pub struct GeneticParams {
    pub population_size: usize,
    pub generations: usize,
    /// Per-offspring probability of a swap mutation
    pub mutation_rate: f64,
    /// Individuals carried over unchanged each generation
    pub elite_count: usize,
    /// Fixed seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.05,
            elite_count: 2,
            seed: None,
        }
    }
}

/// Searches for a low-cost closed tour with a genetic algorithm:
/// binary-tournament selection, ordered crossover, swap mutation,
/// elitism. Tours are anchored at stop 0, so chromosomes permute only
/// `1..n`.
pub fn optimal_route(matrix: &CostMatrix, params: &GeneticParams) -> OptimalRoute {
    let n = matrix.size();
    if n <= 3 {
        // Every anchored tour of up to three stops has the same cost
        // up to direction.
        return OptimalRoute::from_order((0..n).collect());
    }

    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut population: Vec<Vec<usize>> = (0..params.population_size)
        .map(|_| random_tour(n, &mut rng))
        .collect();
    population.sort_by(|a, b| matrix.tour_cost(a).total_cmp(&matrix.tour_cost(b)));

    for generation in 0..params.generations {
        let mut next: Vec<Vec<usize>> = population
            .iter()
            .take(params.elite_count)
            .cloned()
            .collect();

        while next.len() < params.population_size {
            let first = tournament(&population, matrix, &mut rng);
            let second = tournament(&population, matrix, &mut rng);

            let mut child = ordered_crossover(first, second, &mut rng);
            if rng.random_bool(params.mutation_rate) {
                swap_mutation(&mut child, &mut rng);
            }

            next.push(child);
        }

        next.sort_by(|a, b| matrix.tour_cost(a).total_cmp(&matrix.tour_cost(b)));
        population = next;

        if generation % 100 == 0 {
            debug!(
                generation,
                best_cost = matrix.tour_cost(&population[0]),
                "genetic search progress"
            );
        }
    }

    OptimalRoute::from_order(population.swap_remove(0))
}

fn random_tour(n: usize, rng: &mut SmallRng) -> Vec<usize> {
    let mut tail: Vec<usize> = (1..n).collect();
    tail.shuffle(rng);

    let mut tour = Vec::with_capacity(n);
    tour.push(0);
    tour.extend(tail);
    tour
}

/// Binary tournament: the cheaper of two random individuals wins.
fn tournament<'a>(
    population: &'a [Vec<usize>],
    matrix: &CostMatrix,
    rng: &mut SmallRng,
) -> &'a [usize] {
    let first = &population[rng.random_range(0..population.len())];
    let second = &population[rng.random_range(0..population.len())];

    if matrix.tour_cost(first) < matrix.tour_cost(second) {
        first
    } else {
        second
    }
}

/// Ordered crossover over positions `1..n`: the child inherits one
/// slice from the first parent and fills the remaining positions with
/// the second parent's stops in their relative order.
fn ordered_crossover(first: &[usize], second: &[usize], rng: &mut SmallRng) -> Vec<usize> {
    let n = first.len();

    let start = rng.random_range(1..n);
    let end = rng.random_range(start..n);

    let mut taken = vec![false; n];
    for &stop in &first[start..=end] {
        taken[stop] = true;
    }

    let mut filler = second[1..].iter().filter(|&&stop| !taken[stop]);

    let mut child = Vec::with_capacity(n);
    child.push(0);
    for position in 1..n {
        if position >= start && position <= end {
            child.push(first[position]);
        } else {
            child.push(*filler.next().expect("filler covers untaken stops"));
        }
    }

    child
}

fn swap_mutation(tour: &mut [usize], rng: &mut SmallRng) {
    let n = tour.len();
    let a = rng.random_range(1..n);
    let b = rng.random_range(1..n);
    tour.swap(a, b);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_matrix() -> CostMatrix {
        // Four stops on a unit square, indexed so the natural order
        // zig-zags: 0=(0,0), 1=(1,1), 2=(1,0), 3=(0,1).
        let points: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];
        let rows = points
            .iter()
            .map(|a| {
                points
                    .iter()
                    .map(|b| (a.0 - b.0).hypot(a.1 - b.1))
                    .collect()
            })
            .collect();
        CostMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_trivial_instances() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();

        let route = optimal_route(&matrix, &GeneticParams::default());
        assert_eq!(route.order(), &[0, 1, 2]);
    }

    #[test]
    fn test_finds_square_perimeter() {
        let matrix = square_matrix();
        let params = GeneticParams {
            seed: Some(7),
            ..GeneticParams::default()
        };

        let route = optimal_route(&matrix, &params);

        // The perimeter tour costs 4.0; both diagonals cost more.
        assert!((matrix.tour_cost(route.order()) - 4.0).abs() < 1e-9);
        assert_eq!(route.order()[0], 0);
    }

    #[test]
    fn test_route_is_an_anchored_permutation() {
        let matrix = square_matrix();
        let params = GeneticParams {
            seed: Some(42),
            generations: 50,
            ..GeneticParams::default()
        };

        let route = optimal_route(&matrix, &params);

        let mut sorted = route.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        assert_eq!(route.order()[0], 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let matrix = square_matrix();
        let params = GeneticParams {
            seed: Some(1234),
            generations: 20,
            ..GeneticParams::default()
        };

        let first = optimal_route(&matrix, &params);
        let second = optimal_route(&matrix, &params);

        assert_eq!(first, second);
    }

    #[test]
    fn test_ordered_crossover_produces_permutation() {
        let mut rng = SmallRng::seed_from_u64(99);
        let first = vec![0, 3, 1, 4, 2];
        let second = vec![0, 2, 4, 3, 1];

        for _ in 0..50 {
            let child = ordered_crossover(&first, &second, &mut rng);
            let mut sorted = child.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
            assert_eq!(child[0], 0);
        }
    }
}
