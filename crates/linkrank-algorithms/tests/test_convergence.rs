use linkrank_algorithms::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn graph(edges: Vec<(&'static str, Vec<&'static str>)>) -> LinkGraph<&'static str> {
    LinkGraph::from_adjacency(edges).unwrap()
}

/// Shape of the small HTML corpora the CLI is usually pointed at
fn corpus() -> LinkGraph<&'static str> {
    graph(vec![
        ("1.html", vec!["2.html"]),
        ("2.html", vec!["1.html", "3.html"]),
        ("3.html", vec!["2.html", "4.html"]),
        ("4.html", vec!["2.html"]),
        ("5.html", vec![]),
    ])
}

#[test]
fn test_symmetric_two_cycle() {
    let graph = graph(vec![("A", vec!["B"]), ("B", vec!["A"])]);

    let iterated = iterate_ranks(&graph, 0.85, 0.001).unwrap();
    assert!((iterated.get(&"A").unwrap() - 0.5).abs() < 1e-9);
    assert!((iterated.get(&"B").unwrap() - 0.5).abs() < 1e-9);

    let sampled = sample_ranks(&graph, 0.85, 10_000, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert!((sampled.get(&"A").unwrap() - 0.5).abs() < 0.05);
    assert!((sampled.get(&"B").unwrap() - 0.5).abs() < 0.05);
}

#[test]
fn test_dangling_page_fixed_point() {
    // B has no links, so it links to both A and B. Solving
    //   A = 0.075 + 0.85 * B / 2
    //   B = 0.075 + 0.85 * (A + B / 2)
    // with A + B = 1 gives A = 0.5 / 1.425.
    let graph = graph(vec![("A", vec!["B"]), ("B", vec![])]);
    let ranks = iterate_ranks(&graph, 0.85, 0.001).unwrap();

    let expected_a = 0.5 / 1.425;
    assert!((ranks.get(&"A").unwrap() - expected_a).abs() < 0.01);
    assert!((ranks.get(&"B").unwrap() - (1.0 - expected_a)).abs() < 0.01);
    assert!(ranks.is_normalized(1e-9));
}

#[test]
fn test_three_page_cycle_is_uniform() {
    let graph = graph(vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["A"])]);
    let ranks = iterate_ranks(&graph, 0.85, 0.001).unwrap();
    for (_, rank) in ranks.iter() {
        assert!((rank - 1.0 / 3.0).abs() < 1e-9);
    }
}

#[test]
fn test_solver_output_sums_to_one() {
    let graphs = vec![
        corpus(),
        graph(vec![("only", vec![])]),
        graph(vec![("a", vec![]), ("b", vec![]), ("c", vec![])]),
        graph(vec![("a", vec!["b", "c"]), ("b", vec![]), ("c", vec!["a"]), ("d", vec!["a"])]),
    ];

    for graph in &graphs {
        for damping in [0.15, 0.5, 0.85] {
            let ranks = iterate_ranks(graph, damping, 0.001).unwrap();
            assert_eq!(ranks.len(), graph.page_count());
            assert!(ranks.is_normalized(1e-9), "total {}", ranks.total());
            assert!(ranks.iter().all(|(_, r)| r >= 0.0));
        }
    }
}

#[test]
fn test_solver_is_idempotent_from_converged_output() {
    let graph = corpus();
    let config = PageRankConfig::default();
    let solver = IterativeSolver::new(config.clone());

    let converged = solver.solve(&graph).unwrap();
    let again = solver.solve_from(&graph, &converged).unwrap();

    assert!(converged.max_abs_diff(&again) <= config.epsilon);
}

#[test]
fn test_sampling_agrees_with_iteration() {
    let graph = corpus();
    let iterated = IterativeSolver::new(PageRankConfig {
        epsilon: 1e-10,
        ..PageRankConfig::default()
    })
    .solve(&graph)
    .unwrap();

    let sampled = sample_ranks_with_config(
        &graph,
        &SamplingConfig {
            samples: 100_000,
            seed: Some(17),
            chains: 4,
            ..SamplingConfig::default()
        },
    )
    .unwrap();

    assert!(sampled.is_normalized(1e-9));
    assert!(
        sampled.max_abs_diff(&iterated) < 0.02,
        "sampling diverged from iteration by {}",
        sampled.max_abs_diff(&iterated)
    );
}

#[test]
fn test_sampled_ranks_include_every_page() {
    let graph = corpus();
    let sampled = sample_ranks(&graph, 0.85, 50, &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(sampled.len(), graph.page_count());
    assert!(sampled.is_normalized(1e-9));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let graph = corpus();
    let empty: LinkGraph<&str> = LinkGraph::from_adjacency(Vec::<(&str, Vec<&str>)>::new()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    assert!(matches!(
        iterate_ranks(&graph, 0.0, 0.001),
        Err(RankError::InvalidParameter { .. })
    ));
    assert!(matches!(
        sample_ranks(&graph, 0.0, 10, &mut rng),
        Err(RankError::InvalidParameter { .. })
    ));
    assert!(matches!(
        sample_ranks(&graph, 0.85, 0, &mut rng),
        Err(RankError::InvalidParameter { .. })
    ));
    assert!(matches!(iterate_ranks(&empty, 0.85, 0.001), Err(RankError::EmptyGraph)));
    assert!(matches!(
        sample_ranks(&empty, 0.85, 10, &mut rng),
        Err(RankError::EmptyGraph)
    ));
}
