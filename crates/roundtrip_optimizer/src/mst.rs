use crate::{cost_matrix::CostMatrix, route::OptimalRoute};

/// Approximates the optimal tour by building a minimum spanning tree
/// with Prim's algorithm rooted at stop 0, then visiting the tree in
/// preorder. On metric instances the resulting tour costs at most
/// twice the optimum.
pub fn optimal_route(matrix: &CostMatrix) -> OptimalRoute {
    let n = matrix.size();
    if n == 1 {
        return OptimalRoute::from_order(vec![0]);
    }

    let parents = prim_parents(matrix);

    // Children of each tree node, cheapest edge first.
    let mut children = vec![Vec::new(); n];
    for (node, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            children[*parent].push(node);
        }
    }
    for (node, child_list) in children.iter_mut().enumerate() {
        child_list.sort_by(|&a, &b| matrix.cost(node, a).total_cmp(&matrix.cost(node, b)));
    }

    // Preorder walk from the root.
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![0];
    while let Some(node) = stack.pop() {
        order.push(node);
        // reversed so the cheapest child is visited first
        stack.extend(children[node].iter().rev());
    }

    OptimalRoute::from_order(order)
}

/// Prim's algorithm over the dense matrix; returns the MST parent of
/// every stop (`None` for the root).
fn prim_parents(matrix: &CostMatrix) -> Vec<Option<usize>> {
    let n = matrix.size();

    let mut in_tree = vec![false; n];
    let mut best_cost = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    best_cost[0] = 0.0;

    for _ in 0..n {
        let next = (0..n)
            .filter(|&node| !in_tree[node])
            .min_by(|&a, &b| best_cost[a].total_cmp(&best_cost[b]))
            .expect("loop runs once per node");

        in_tree[next] = true;

        for node in 0..n {
            let cost = matrix.cost(next, node);
            if !in_tree[node] && cost < best_cost[node] {
                best_cost[node] = cost;
                parent[node] = Some(next);
            }
        }
    }

    parent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stop() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0]]).unwrap();
        assert_eq!(optimal_route(&matrix).order(), &[0]);
    }

    #[test]
    fn test_two_stops() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap();
        assert_eq!(optimal_route(&matrix).order(), &[0, 1]);
    }

    #[test]
    fn test_chain_is_followed_in_order() {
        // Stops on a line: 0 --1-- 1 --1-- 2 --1-- 3. The MST is the
        // chain itself, so preorder gives the natural order.
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![3.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();

        assert_eq!(optimal_route(&matrix).order(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_nearer_stop_visited_first() {
        // 2 is much closer to 0 than 1 is, so the tree hangs both off
        // the root and preorder visits 2 before 1.
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0],
            vec![10.0, 0.0, 20.0],
            vec![1.0, 20.0, 0.0],
        ])
        .unwrap();

        let route = optimal_route(&matrix);

        assert_eq!(route.order(), &[0, 2, 1]);
    }

    #[test]
    fn test_route_is_a_permutation() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 3.0, 4.0, 2.0, 7.0],
            vec![3.0, 0.0, 4.0, 6.0, 3.0],
            vec![4.0, 4.0, 0.0, 5.0, 8.0],
            vec![2.0, 6.0, 5.0, 0.0, 6.0],
            vec![7.0, 3.0, 8.0, 6.0, 0.0],
        ])
        .unwrap();

        let route = optimal_route(&matrix);

        let mut sorted = route.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        assert_eq!(route.order()[0], 0);
    }
}
