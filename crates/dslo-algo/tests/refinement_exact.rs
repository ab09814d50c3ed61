mod common;

use dslo_algo::{check_uniqueness, Engine, LpOracle, Uniqueness};
use dslo_core::report::SilentReporter;
use dslo_core::rng::RngHandle;
use dslo_graph::{gen_random_weighted, gen_random_weighted_in};
use proptest::prelude::*;

use common::{
    brute_force_max_density, count_maximizers, light_pairs, n, subset_density, triangle_with_tail,
    with_twin,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn find_minimal_attains_the_exhaustive_optimum(
        seed in any::<u64>(),
        nodes in 1usize..8,
        edges in 1usize..10,
    ) {
        let graph =
            gen_random_weighted_in(nodes, edges, 3, 0.01..2.0, &mut RngHandle::from_seed(seed)).unwrap();
        let optimum = brute_force_max_density(&graph);
        let mut engine = Engine::new(LpOracle, seed, &SilentReporter);

        let densest = engine.densest_subgraph(&graph).unwrap();
        prop_assert!((densest.density() - optimum).abs() < 1e-6);

        let minimal = engine.find_minimal(&graph).unwrap();
        prop_assert!(minimal.node_count() >= 1);
        prop_assert!((minimal.density() - optimum).abs() < 1e-6);
        prop_assert!((subset_density(&graph, &minimal.node_ids()) - optimum).abs() < 1e-6);
    }

    #[test]
    fn uniqueness_verdict_matches_exhaustive_count(
        seed in any::<u64>(),
        nodes in 2usize..6,
        edges in 1usize..7,
        twin in any::<bool>(),
    ) {
        let base =
            gen_random_weighted_in(nodes, edges, 3, 0.01..2.0, &mut RngHandle::from_seed(seed)).unwrap();
        let graph = if twin { with_twin(&base, 100) } else { base };
        let maximizers = count_maximizers(&graph);
        let mut engine = Engine::new(LpOracle, seed, &SilentReporter);
        let verdict = check_uniqueness(&mut engine, &graph).unwrap();
        prop_assert_eq!(verdict.is_unique(), maximizers == 1, "{} maximizers, {:?}", maximizers, verdict);
        if twin {
            prop_assert!(!verdict.is_unique());
        }
        if let Uniqueness::Unique { certificate } = verdict {
            prop_assert!((certificate.density() - brute_force_max_density(&graph)).abs() < 1e-6);
        }
    }
}

#[test]
fn light_node_weights_keep_the_densest_pair() {
    for scale in [1.0, 10.0] {
        let graph = light_pairs(scale);
        let optimum = 2.5 / scale;
        assert!((brute_force_max_density(&graph) - optimum).abs() < 1e-9);
        let pair = [n(1), n(2)].into_iter().collect();

        let mut engine = Engine::new(LpOracle, 0, &SilentReporter);
        let densest = engine.densest_subgraph(&graph).unwrap();
        assert_eq!(densest.node_ids(), pair);
        let minimal = engine.find_minimal(&graph).unwrap();
        assert_eq!(minimal.node_ids(), pair);
        assert!((minimal.density() - optimum).abs() < 1e-9);

        match check_uniqueness(&mut engine, &graph).unwrap() {
            Uniqueness::Unique { certificate } => assert_eq!(certificate.node_ids(), pair),
            other => panic!("scale {scale}: expected a unique maximiser, got {other:?}"),
        }
    }
}

#[test]
fn scenario_core_is_the_minimal_certificate() {
    let graph = triangle_with_tail();
    assert!((brute_force_max_density(&graph) - 2.0).abs() < 1e-12);
    for seed in 0..4 {
        let mut engine = Engine::new(LpOracle, seed, &SilentReporter);
        let minimal = engine.find_minimal(&graph).unwrap();
        assert_eq!(minimal.node_ids(), [n(1), n(2), n(3)].into_iter().collect());
    }
}

#[test]
fn results_do_not_alias_their_input() {
    let graph = triangle_with_tail();
    let mut engine = Engine::new(LpOracle, 0, &SilentReporter);
    let mut minimal = engine.find_minimal(&graph).unwrap();
    minimal.remove_node_set([n(1), n(2)]);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn same_seed_same_certificates() {
    let graph = gen_random_weighted(9, 14, 3, &mut RngHandle::from_seed(21)).unwrap();
    let run = |seed| {
        let mut engine = Engine::new(LpOracle, seed, &SilentReporter);
        engine
            .find_all_minimal(&graph)
            .unwrap()
            .iter()
            .map(|certificate| certificate.node_ids())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}
