//! End-to-end behavior of the ranking engine through its public surface.

mod common {
    use maintenance_advisor::catalog::{Alternative, CategoryCatalog};
    use maintenance_advisor::criteria::{CriteriaSet, Criterion, Polarity};
    use maintenance_advisor::ranking::RankingEngine;
    use std::sync::Arc;

    pub(super) fn benefit_cost() -> CriteriaSet {
        CriteriaSet::new(vec![
            Criterion::new("c1", 0.5, Polarity::Benefit, "C1. Coverage"),
            Criterion::new("c2", 0.5, Polarity::Cost, "C2. Price"),
        ])
        .expect("valid criteria")
    }

    pub(super) fn alternative(name: &str, c1: f64, c2: f64) -> Alternative {
        Alternative::new(name, [("c1", c1), ("c2", c2)])
    }

    pub(super) fn engine(catalog: CategoryCatalog) -> RankingEngine {
        RankingEngine::new(Arc::new(benefit_cost()), Arc::new(catalog)).expect("engine")
    }

    pub(super) fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }
}

mod scenarios {
    use super::common::*;
    use maintenance_advisor::catalog::CategoryCatalog;
    use maintenance_advisor::ranking::{ComputationError, RankingEngine, RankingError};

    #[test]
    fn two_alternative_reference_run() {
        let catalog = CategoryCatalog::new().with_category(
            "X",
            vec![alternative("A", 3.0, 1.0), alternative("B", 1.0, 3.0)],
        );

        let ranking = engine(catalog).rank("X").expect("ranking");
        let trace = ranking.trace.as_ref().expect("trace");

        assert_eq!(trace.matrix_raw, vec![vec![3.0, 1.0], vec![1.0, 3.0]]);
        assert_eq!(trace.col_sums, vec![4.0, 4.0]);
        assert_eq!(trace.matrix_norm, vec![vec![0.75, 0.25], vec![0.25, 0.75]]);
        assert_eq!(
            trace.matrix_weighted,
            vec![vec![0.375, 0.125], vec![0.125, 0.375]]
        );
        assert_eq!(trace.s_plus, vec![0.375, 0.125]);
        assert_eq!(trace.s_minus, vec![0.125, 0.375]);
        assert!(close(trace.sum_s_minus, 0.5));
        assert!(close(trace.inv_s_minus[0], 8.0));
        assert!(close(trace.inv_s_minus[1], 2.666_666_666_666_667));
        assert!(close(trace.sum_inv_s_minus, 10.666_666_666_666_666));
        assert!(close(trace.q[0], 0.75));
        assert!(close(trace.q[1], 0.25));
        assert!(close(trace.q_max, 0.75));
        assert_eq!(trace.criteria_labels, vec!["C1. Coverage", "C2. Price"]);
        assert_eq!(trace.weights, vec![0.5, 0.5]);
        assert_eq!(trace.alternatives_names, vec!["A", "B"]);

        let names: Vec<&str> = ranking.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(ranking.results[0].utility, 100.0);
        assert!((ranking.results[1].utility - 33.33).abs() < 0.01);
        assert_eq!(ranking.results[1].rank, 2);
    }

    #[test]
    fn single_alternative_without_cost_completes() {
        let catalog =
            CategoryCatalog::new().with_category("X", vec![alternative("Solo", 2.0, 0.0)]);

        let ranking = engine(catalog).rank("X").expect("ranking");
        let trace = ranking.trace.as_ref().expect("trace");

        assert_eq!(trace.col_sums, vec![2.0, 1.0]);
        assert_eq!(trace.matrix_weighted[0][1], 0.0);
        assert_eq!(trace.s_minus, vec![0.0]);
        assert_eq!(trace.inv_s_minus, vec![0.0]);
        assert_eq!(trace.q, vec![trace.s_plus[0]]);
        assert_eq!(ranking.results[0].utility, 100.0);
    }

    #[test]
    fn all_zero_matrix_yields_zero_utilities() {
        let catalog = CategoryCatalog::new().with_category(
            "X",
            vec![alternative("A", 0.0, 0.0), alternative("B", 0.0, 0.0)],
        );

        let ranking = engine(catalog).rank("X").expect("degenerate run succeeds");

        assert!(ranking.results.iter().all(|r| r.utility == 0.0 && r.q == 0.0));
        assert_eq!(ranking.trace.expect("trace").q_max, 0.0);
        assert_eq!(ranking.results[0].name, "A");
    }

    #[test]
    fn overflowing_scores_fail_instead_of_ranking() {
        let catalog = CategoryCatalog::new().with_category(
            "X",
            vec![alternative("A", 1.5e308, 1.0), alternative("B", 1.5e308, 3.0)],
        );

        let error = engine(catalog).rank("X").expect_err("overflow surfaces");

        assert_eq!(
            error,
            RankingError::Computation(ComputationError::NonFiniteColumnSum { column: 0 })
        );
    }

    #[test]
    fn equal_utilities_keep_catalog_order() {
        let catalog = CategoryCatalog::new().with_category(
            "X",
            vec![
                alternative("Low", 1.0, 4.0),
                alternative("First", 2.0, 2.0),
                alternative("Second", 2.0, 2.0),
                alternative("Third", 2.0, 2.0),
            ],
        );

        let ranking = engine(catalog).rank("X").expect("ranking");

        let names: Vec<&str> = ranking.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third", "Low"]);
    }

    #[test]
    fn standard_medium_tier_ties_identical_packages_in_catalog_order() {
        let ranking = RankingEngine::standard().rank("Medium").expect("ranking");

        let names: Vec<&str> = ranking.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Standard Package",
                "Complete Service Package",
                "Monthly Service Package"
            ]
        );
        assert_eq!(ranking.results[0].utility, ranking.results[1].utility);
        assert_eq!(ranking.results[0].payload["original_price"], 150_000);
    }

    #[test]
    fn standard_heavy_tier_favours_overhaul() {
        let ranking = RankingEngine::standard().rank("Heavy").expect("ranking");
        assert_eq!(ranking.results[0].name, "Engine Overhaul Package");
        assert_eq!(ranking.results[0].utility, 100.0);
    }

    #[test]
    fn repeated_runs_are_identical_and_independent() {
        let engine = RankingEngine::standard();

        let mut first = engine.rank("Heavy").expect("first");
        let second = engine.rank("Heavy").expect("second");
        assert_eq!(first, second);

        if let Some(trace) = first.trace.as_mut() {
            trace.matrix_raw[0][0] = 99.0;
            trace.weights[0] = 0.0;
        }
        let third = engine.rank("Heavy").expect("third");
        assert_eq!(second, third);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(RankingEngine::standard());
        let expected = engine.rank("Light").expect("baseline");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.rank("Light").expect("ranking"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    }
}

mod properties {
    use maintenance_advisor::catalog::Alternative;
    use maintenance_advisor::criteria::{CriteriaSet, Criterion, Polarity};
    use maintenance_advisor::ranking::{matrix::DecisionMatrix, normalize, rank_alternatives};
    use proptest::prelude::*;

    fn three_criteria() -> CriteriaSet {
        CriteriaSet::new(vec![
            Criterion::new("b1", 0.4, Polarity::Benefit, "B1"),
            Criterion::new("b2", 0.3, Polarity::Benefit, "B2"),
            Criterion::new("c1", 0.3, Polarity::Cost, "C1"),
        ])
        .expect("criteria")
    }

    fn catalog_rows() -> impl Strategy<Value = Vec<[f64; 3]>> {
        prop::collection::vec(prop::array::uniform3(1.0f64..10.0), 2..6)
    }

    fn alternatives(rows: &[[f64; 3]]) -> Vec<Alternative> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                Alternative::new(
                    format!("alt-{index}"),
                    [("b1", row[0]), ("b2", row[1]), ("c1", row[2])],
                )
            })
            .collect()
    }

    fn utility_of(rows: &[[f64; 3]], name: &str) -> f64 {
        let (results, _) =
            rank_alternatives(&three_criteria(), &alternatives(rows)).expect("ranking");
        results
            .iter()
            .find(|result| result.name == name)
            .map(|result| result.utility)
            .expect("alternative ranked")
    }

    proptest! {
        #[test]
        fn normalized_columns_sum_to_one(rows in catalog_rows()) {
            let raw = DecisionMatrix::from_rows(rows.iter().map(|row| row.to_vec()).collect(), 3)
                .expect("matrix");
            let (_, normalized) = normalize::normalize(&raw).expect("normalize");
            for col in 0..3 {
                let sum: f64 = (0..normalized.rows()).map(|row| normalized.get(row, col)).sum();
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn utilities_stay_within_scale(rows in catalog_rows()) {
            let (results, _) =
                rank_alternatives(&three_criteria(), &alternatives(&rows)).expect("ranking");
            for result in &results {
                prop_assert!(result.utility >= 0.0 && result.utility <= 100.0);
            }
            let top = results.iter().map(|result| result.utility).fold(0.0, f64::max);
            prop_assert_eq!(top, 100.0);
            for pair in results.windows(2) {
                prop_assert!(pair[0].utility >= pair[1].utility - 1e-9);
            }
        }

        #[test]
        fn raising_a_benefit_never_lowers_utility(
            rows in catalog_rows(),
            target in 0usize..6,
            column in 0usize..2,
            bump in 0.1f64..5.0,
        ) {
            let target = target % rows.len();
            let name = format!("alt-{target}");
            let before = utility_of(&rows, &name);

            let mut raised = rows.clone();
            raised[target][column] += bump;
            let after = utility_of(&raised, &name);

            prop_assert!(after >= before - 1e-9, "before {} after {}", before, after);
        }

        #[test]
        fn raising_a_cost_never_raises_utility(
            rows in catalog_rows(),
            target in 0usize..6,
            bump in 0.1f64..5.0,
        ) {
            let target = target % rows.len();
            let name = format!("alt-{target}");
            let before = utility_of(&rows, &name);

            let mut raised = rows.clone();
            raised[target][2] += bump;
            let after = utility_of(&raised, &name);

            prop_assert!(after <= before + 1e-9, "before {} after {}", before, after);
        }

        #[test]
        fn identical_inputs_rank_identically(rows in catalog_rows()) {
            let first = rank_alternatives(&three_criteria(), &alternatives(&rows)).expect("first");
            let second = rank_alternatives(&three_criteria(), &alternatives(&rows)).expect("second");
            prop_assert_eq!(first, second);
        }

        #[test]
        fn weights_off_unity_are_rejected(delta in 1e-5f64..0.2) {
            let result = CriteriaSet::new(vec![
                Criterion::new("c1", 0.5, Polarity::Benefit, "C1"),
                Criterion::new("c2", 0.5 - delta, Polarity::Cost, "C2"),
            ]);
            prop_assert!(result.is_err());
        }
    }
}
