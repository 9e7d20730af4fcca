//! Property tests for the recommendation pipeline stages.

use std::collections::BTreeSet;

use chrono::Utc;
use proptest::prelude::*;

use atec_core::config::{RankingMode, SortOrder};
use atec_core::models::AnswerRecord;
use atec_recommend::aggregate::aggregate_full;
use atec_recommend::ranking::rank;
use atec_recommend::{select_neighbors, Aggregate, RatingMatrix, SimilarityMatrix};

/// Random answers over up to 8 evaluations and 6 questions, scores 0..=5.
fn answers_strategy() -> impl Strategy<Value = Vec<AnswerRecord>> {
    prop::collection::vec((1i64..=8, 1i64..=6, 0u8..=5), 1..60).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(e, q, s)| AnswerRecord::new(e, 100 + e, q, f64::from(s), Utc::now()))
            .collect()
    })
}

fn mode_strategy() -> impl Strategy<Value = (RankingMode, SortOrder)> {
    (any::<bool>(), any::<bool>()).prop_map(|(gap, asc)| {
        (
            if gap { RankingMode::Gap } else { RankingMode::Unanswered },
            if asc { SortOrder::Asc } else { SortOrder::Desc },
        )
    })
}

proptest! {
    #[test]
    fn similarity_is_symmetric_bounded_and_never_nan(answers in answers_strategy()) {
        let matrix = RatingMatrix::build(&answers).unwrap();
        let sim = SimilarityMatrix::compute(&matrix, 0.0);
        for &a in sim.ids() {
            for &b in sim.ids() {
                let ab = sim.get(a, b).unwrap();
                prop_assert!(!ab.is_nan());
                prop_assert!((-1.0..=1.0).contains(&ab));
                prop_assert_eq!(ab, sim.get(b, a).unwrap());
            }
        }
    }

    #[test]
    fn diagonal_is_one_or_zero_for_zero_rows(answers in answers_strategy()) {
        let matrix = RatingMatrix::build(&answers).unwrap();
        let sim = SimilarityMatrix::compute(&matrix, 0.0);
        for &e in sim.ids() {
            let zero_row = matrix.row(e).unwrap().values().all(|s| *s == 0.0);
            let expected = if zero_row { 0.0 } else { 1.0 };
            prop_assert_eq!(sim.get(e, e), Some(expected));
        }
    }

    #[test]
    fn neighbors_exclude_target_and_respect_k(answers in answers_strategy(), k in 1usize..10) {
        let matrix = RatingMatrix::build(&answers).unwrap();
        let sim = SimilarityMatrix::compute(&matrix, 0.0);
        for &target in sim.ids() {
            let neighbors = select_neighbors(target, &sim, k).unwrap();
            prop_assert!(neighbors.iter().all(|n| n.evaluation_id != target));
            prop_assert_eq!(neighbors.len(), k.min(sim.len() - 1));
            let ids: BTreeSet<_> = neighbors.iter().map(|n| n.evaluation_id).collect();
            prop_assert_eq!(ids.len(), neighbors.len());
            for pair in neighbors.windows(2) {
                prop_assert!(pair[0].similarity >= pair[1].similarity);
            }
        }
    }

    #[test]
    fn aggregate_never_has_zero_contributors(answers in answers_strategy(), k in 1usize..10) {
        let matrix = RatingMatrix::build(&answers).unwrap();
        let sim = SimilarityMatrix::compute(&matrix, 0.0);
        let target = sim.ids()[0];
        let neighbors = select_neighbors(target, &sim, k).unwrap();
        let aggregate = aggregate_full(&matrix, &neighbors);
        for (question_id, agg) in aggregate.iter() {
            prop_assert!(agg.contributors >= 1);
            prop_assert!(neighbors
                .iter()
                .any(|n| matrix.row(n.evaluation_id).unwrap().contains_key(&question_id)));
        }
    }

    #[test]
    fn ranker_output_is_bounded_subset_of_aggregate(
        answers in answers_strategy(),
        (mode, order) in mode_strategy(),
        limit in 1usize..8,
    ) {
        let matrix = RatingMatrix::build(&answers).unwrap();
        let sim = SimilarityMatrix::compute(&matrix, 0.0);
        let target = sim.ids()[0];
        let neighbors = select_neighbors(target, &sim, 5).unwrap();
        let aggregate: Aggregate = aggregate_full(&matrix, &neighbors);
        let ranked = rank(mode, order, matrix.row(target).unwrap(), &aggregate, limit);

        prop_assert!(ranked.len() <= limit);
        let ids: BTreeSet<_> = ranked.iter().map(|r| r.question_id).collect();
        prop_assert_eq!(ids.len(), ranked.len());
        prop_assert!(ids.iter().all(|q| aggregate.get(*q).is_some()));
    }

    #[test]
    fn matrix_is_independent_of_input_order_without_duplicates(answers in answers_strategy()) {
        let mut seen = BTreeSet::new();
        let unique: Vec<AnswerRecord> = answers
            .into_iter()
            .filter(|a| seen.insert((a.evaluation_id, a.question_id)))
            .collect();
        let mut reversed = unique.clone();
        reversed.reverse();

        let forward = RatingMatrix::build(&unique).unwrap();
        let backward = RatingMatrix::build(&reversed).unwrap();
        for e in forward.evaluation_ids() {
            prop_assert_eq!(forward.row(e), backward.row(e));
        }
    }
}
