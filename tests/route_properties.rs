// Property checks for the route algorithms on seeded random point sets
use circuit_routes::algorithms::bfs::level_traversal;
use circuit_routes::algorithms::branch_bound::{BranchAndBound, SearchLimits};
use circuit_routes::algorithms::dijkstra::{shortest_path, shortest_path_indices};
use circuit_routes::algorithms::heuristic::NearestNeighborTwoOpt;
use circuit_routes::algorithms::{nearest_neighbor, TourSolver};
use circuit_routes::models::Point;
use circuit_routes::utils::connections::connection_graph;
use circuit_routes::DistanceMatrix;
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

fn random_points(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let lat = rng.gen_range(-60.0..60.0);
            let lon = rng.gen_range(-170.0..170.0);
            Point::new(format!("Circuit {i}"), lat, lon).unwrap()
        })
        .collect()
}

/// Cheapest open path from `origin`, trying every permutation
fn brute_force(matrix: &DistanceMatrix, origin: usize) -> f64 {
    fn permute(matrix: &DistanceMatrix, path: &mut Vec<usize>, used: &mut Vec<bool>, best: &mut f64) {
        if path.len() == used.len() {
            *best = best.min(matrix.path_length(path));
            return;
        }
        for j in 0..used.len() {
            if !used[j] {
                used[j] = true;
                path.push(j);
                permute(matrix, path, used, best);
                path.pop();
                used[j] = false;
            }
        }
    }
    let mut used = vec![false; matrix.len()];
    used[origin] = true;
    let mut best = f64::INFINITY;
    permute(matrix, &mut vec![origin], &mut used, &mut best);
    best
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    let unique: HashSet<usize> = order.iter().copied().collect();
    order.len() == n && unique.len() == n && order.iter().all(|&i| i < n)
}

#[test]
fn distance_is_symmetric() {
    let pts = random_points(1, 12);
    let matrix = DistanceMatrix::from_points(&pts);
    for i in 0..pts.len() {
        assert_eq!(pts[i].distance_to(&pts[i]), 0.0);
        for j in 0..pts.len() {
            assert_eq!(pts[i].distance_to(&pts[j]), pts[j].distance_to(&pts[i]));
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}

#[test]
fn bfs_partitions_points_and_orders_levels() {
    for seed in 0..5 {
        let pts = random_points(seed, 15);
        for threshold in [500.0, 2500.0, 6000.0, 30000.0] {
            let result = level_traversal(&pts, "Circuit 3", threshold).unwrap();

            assert_eq!(result.visit_order[0], "Circuit 3");
            assert_eq!(result.levels[&0], vec!["Circuit 3".to_string()]);

            let visited: HashSet<&String> = result.visit_order.iter().collect();
            let unreached: HashSet<&String> = result.unreached.iter().collect();
            assert!(visited.is_disjoint(&unreached));
            assert_eq!(visited.len() + unreached.len(), pts.len());
            assert_eq!(result.visit_order.len(), visited.len());

            let flattened: Vec<String> = result.levels.values().flatten().cloned().collect();
            assert_eq!(flattened, result.visit_order);
        }
    }
}

#[test]
fn bfs_reaches_the_connected_component() {
    let pts = random_points(7, 14);
    let matrix = DistanceMatrix::from_points(&pts);
    let threshold = 3000.0;
    let graph = connection_graph(&pts, &matrix, threshold);
    let result = level_traversal(&pts, "Circuit 0", threshold).unwrap();

    for (i, point) in pts.iter().enumerate() {
        let connected = has_path_connecting(&graph, NodeIndex::new(0), NodeIndex::new(i), None);
        assert_eq!(connected, result.visit_order.contains(&point.name));
    }
}

#[test]
fn three_point_scenario() {
    let pts = vec![
        Point::new("A", 0.0, 0.0).unwrap(),
        Point::new("B", 0.0, 1.0).unwrap(),
        Point::new("C", 1.0, 0.0).unwrap(),
    ];
    let ac = pts[0].distance_to(&pts[2]);
    let bc = pts[1].distance_to(&pts[2]);

    let traversal = level_traversal(&pts, "A", (ac + bc) / 2.0).unwrap();
    assert_eq!(traversal.levels[&0], vec!["A"]);
    assert_eq!(traversal.levels[&1], vec!["B", "C"]);
    assert!(traversal.unreached.is_empty());

    let path = shortest_path(&pts, "A", "C").unwrap();
    assert_eq!(path.route, vec!["A", "C"]);
    assert_eq!(path.total_km, ac.round());
}

#[test]
fn dijkstra_obeys_triangle_inequality() {
    let pts = random_points(11, 9);
    let matrix = DistanceMatrix::from_points(&pts);
    for a in 0..pts.len() {
        let same = shortest_path(&pts, &pts[a].name, &pts[a].name).unwrap();
        assert_eq!(same.route, vec![pts[a].name.clone()]);
        assert_eq!(same.total_km, 0.0);

        for b in 0..pts.len() {
            for c in 0..pts.len() {
                if a == b || b == c || a == c {
                    continue;
                }
                let ac = shortest_path_indices(&matrix, a, c).unwrap().length;
                let ab = shortest_path_indices(&matrix, a, b).unwrap().length;
                let bc = shortest_path_indices(&matrix, b, c).unwrap().length;
                assert!(ac <= ab + bc + 1e-9);
            }
        }
    }
}

#[test]
fn heuristic_returns_permutation_and_improves_greedy() {
    let solver = NearestNeighborTwoOpt::new();
    for seed in 20..25 {
        let pts = random_points(seed, 18);
        let matrix = DistanceMatrix::from_points(&pts);
        let best = solver.best_tour(&matrix);
        assert!(is_permutation(&best.order, pts.len()));

        for start in 0..pts.len() {
            let greedy = matrix.path_length(&nearest_neighbor(&matrix, start));
            let improved = solver.tour_from(&matrix, start);
            assert!(is_permutation(&improved.order, pts.len()));
            assert!(improved.length <= greedy);
            assert!(best.length <= improved.length);
        }

        let named = solver.route(&pts, None).unwrap();
        let unique: HashSet<&String> = named.route.iter().collect();
        assert_eq!(unique.len(), pts.len());
    }
}

#[test]
fn exact_tour_matches_brute_force_on_small_sets() {
    for seed in 30..36 {
        let pts = random_points(seed, 7);
        let matrix = DistanceMatrix::from_points(&pts);
        let heuristic = NearestNeighborTwoOpt::new();
        let solver = BranchAndBound::new();

        for origin in [0, 4] {
            let outcome = solver.search(&matrix, origin);
            assert!(!outcome.stats.budget_exhausted);
            assert!(is_permutation(&outcome.tour.order, pts.len()));
            assert_eq!(outcome.tour.order[0], origin);
            assert!((outcome.tour.length - brute_force(&matrix, origin)).abs() < 1e-6);
            assert!(outcome.tour.length <= heuristic.tour_from(&matrix, origin).length);
        }
    }
}

#[test]
fn exact_tour_never_worse_than_heuristic_under_tight_budgets() {
    let pts = random_points(42, 22);
    let matrix = DistanceMatrix::from_points(&pts);
    let limits = SearchLimits {
        time_limit: Duration::from_millis(200),
        max_nodes: 500,
        expansion_limit: Some(4),
    };
    let outcome = BranchAndBound::with_limits(limits).search(&matrix, 5);
    let heuristic = NearestNeighborTwoOpt::new().tour_from(&matrix, 5);

    assert!(is_permutation(&outcome.tour.order, pts.len()));
    assert_eq!(outcome.tour.order[0], 5);
    assert!(outcome.tour.length <= heuristic.length);
    assert!(outcome.stats.explored <= 500);
}

#[test]
fn algorithms_are_deterministic() {
    let pts = random_points(99, 10);

    let first = NearestNeighborTwoOpt::new().route(&pts, None).unwrap();
    let second = NearestNeighborTwoOpt::new().route(&pts, None).unwrap();
    assert_eq!(first, second);

    let (exact_a, _) = BranchAndBound::new().solve(&pts, Some("Circuit 2")).unwrap();
    let (exact_b, _) = BranchAndBound::new().solve(&pts, Some("circuit 2")).unwrap();
    assert_eq!(exact_a, exact_b);

    let bfs_a = level_traversal(&pts, "Circuit 1", 4000.0).unwrap();
    let bfs_b = level_traversal(&pts, "Circuit 1", 4000.0).unwrap();
    assert_eq!(bfs_a, bfs_b);

    let path_a = shortest_path(&pts, "Circuit 0", "Circuit 9").unwrap();
    let path_b = shortest_path(&pts, "Circuit 0", "Circuit 9").unwrap();
    assert_eq!(path_a, path_b);
}
