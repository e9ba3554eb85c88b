use approx::assert_abs_diff_eq;
use vnfbackup::assignment::Assignment;
use vnfbackup::availability::availability;
use vnfbackup::common::Cost;
use vnfbackup::cost::CostModel;
use vnfbackup::min_flow::ShortestPathMethod;
use vnfbackup::random_graph::{generate, ProbRange};
use vnfbackup::solver::{
    solve, AssignmentSolver, CycleCanceling, SolverConfig, SuccessiveShortestPaths,
};
use vnfbackup::{AssignmentError, BackupGraph};

///
/// Minimum total cost over all feasible assignments, by enumerating `n^m` mappings.
///
fn brute_force_min_cost(graph: &BackupGraph, cost_model: &CostModel) -> Option<Cost> {
    let m = graph.n_vnfs();
    let n = graph.n_servers();
    let mut best: Option<Cost> = None;
    let mut servers = vec![0; m];
    loop {
        let pairs: Vec<(usize, usize)> = servers.iter().copied().enumerate().collect();
        let a = Assignment::from_pairs(pairs);
        if a.is_complete_for(graph) {
            let c = a.total_cost(graph, cost_model).unwrap();
            best = Some(best.map_or(c, |b| b.min(c)));
        }
        // next mapping in lexicographic order
        let mut k = 0;
        while k < m && servers[k] + 1 == n {
            servers[k] = 0;
            k += 1;
        }
        if k == m || n == 0 {
            break;
        }
        servers[k] += 1;
    }
    best
}

fn solvers() -> Vec<Box<dyn AssignmentSolver>> {
    let dijkstra = SolverConfig {
        method: ShortestPathMethod::Dijkstra,
        ..SolverConfig::default()
    };
    vec![
        Box::new(SuccessiveShortestPaths::default()),
        Box::new(SuccessiveShortestPaths::new(dijkstra)),
        Box::new(CycleCanceling::default()),
    ]
}

#[test]
fn example_instance() {
    let json = r#"{
        "vnfs": {"0": {"failure_prob": 0.1}, "1": {"failure_prob": 0.2}},
        "servers": {"0": {"failure_prob": 0.3, "capacity": 1}, "1": {"failure_prob": 0.1, "capacity": 1}}
    }"#;
    let graph = BackupGraph::from_json_str(json).unwrap();
    let solution = solve(&graph).unwrap();
    // 0.1*0.3 + 0.2*0.1 = 0.05 < 0.1*0.1 + 0.2*0.3 = 0.07
    assert_eq!(solution.mapping.pairs(), &[(0, 0), (1, 1)]);
    assert_abs_diff_eq!(solution.availability, 0.97 * 0.98, epsilon = 1e-12);
    assert_eq!(
        Some(solution.total_cost),
        brute_force_min_cost(&graph, &CostModel::default())
    );
}

#[test]
fn optimal_on_small_instances() {
    let cost_model = CostModel::default();
    let range = ProbRange::new(0.0, 0.9).unwrap();
    let mut seed = 0;
    for m in 1..=5 {
        for n in 1..=4 {
            for r in 1..=2 {
                if n * r < m {
                    continue;
                }
                let graph = generate(m, n, r, range, range, seed).unwrap();
                seed += 1;
                let best = brute_force_min_cost(&graph, &cost_model).unwrap();
                for solver in solvers() {
                    let s = solver.solve(&graph).unwrap();
                    assert!(s.mapping.is_complete_for(&graph));
                    assert_eq!(
                        s.total_cost,
                        best,
                        "{} m={} n={} r={}\n{}",
                        solver.name(),
                        m,
                        n,
                        r,
                        graph
                    );
                }
            }
        }
    }
}

#[test]
fn solvers_agree_on_larger_instances() {
    let vr = ProbRange::new(0.01, 0.3).unwrap();
    let sr = ProbRange::new(0.05, 0.5).unwrap();
    for seed in 0..5 {
        let graph = generate(20, 8, 3, vr, sr, seed).unwrap();
        let costs: Vec<Cost> = solvers()
            .iter()
            .map(|solver| {
                let s = solver.solve(&graph).unwrap();
                assert!(s.mapping.is_complete_for(&graph));
                assert!(0.0 < s.availability && s.availability <= 1.0);
                assert_abs_diff_eq!(
                    s.availability,
                    availability(&graph, &s.mapping),
                    epsilon = 1e-15
                );
                s.total_cost
            })
            .collect();
        assert!(costs.windows(2).all(|w| w[0] == w[1]), "{:?}", costs);
    }
}

#[test]
fn solve_is_idempotent() {
    let r = ProbRange::new(0.0, 0.5).unwrap();
    let g1 = generate(12, 5, 3, r, r, 42).unwrap();
    let g2 = generate(12, 5, 3, r, r, 42).unwrap();
    let s1 = solve(&g1).unwrap();
    let s2 = solve(&g2).unwrap();
    let s3 = solve(&g1).unwrap();
    assert_eq!(s1, s2);
    assert_eq!(s1, s3);
}

#[test]
fn all_zero_probabilities() {
    let graph = BackupGraph::from_probs(&[0.0; 4], &[0.0; 3], 2).unwrap();
    let s = solve(&graph).unwrap();
    assert_eq!(s.mapping.len(), 4);
    assert_eq!(s.availability, 1.0);
    assert_eq!(s.total_cost, 0);
}

#[test]
fn infeasible_instance() {
    let graph = BackupGraph::from_probs(&[0.1, 0.2, 0.3], &[0.1], 1).unwrap();
    for solver in solvers() {
        assert!(matches!(
            solver.solve(&graph),
            Err(AssignmentError::InfeasibleAssignment { required: 3, .. })
        ));
    }
}

#[test]
fn invalid_graph_json() {
    let json = r#"{
        "vnfs": {"0": {"failure_prob": 1.5}},
        "servers": {"0": {"failure_prob": 0.3, "r": 1}}
    }"#;
    assert!(matches!(
        BackupGraph::from_json_str(json),
        Err(AssignmentError::InvalidGraph(_))
    ));
    let json = r#"{
        "vnfs": {"0": {"failure_prob": 0.1}},
        "servers": {"0": {"failure_prob": 0.3, "r": 0}}
    }"#;
    assert!(matches!(
        BackupGraph::from_json_str(json),
        Err(AssignmentError::InvalidGraph(_))
    ));
}
