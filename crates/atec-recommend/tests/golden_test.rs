//! Golden scenario tests: every JSON file under test-fixtures/scenarios runs
//! through the engine and must produce its recorded outcome.

use atec_core::errors::AtecErrorCode;
use atec_core::models::RecommendOutcome;
use atec_recommend::RecommendationEngine;
use test_fixtures::{load_scenarios, Expected, Scenario};

fn run(scenario: &Scenario) {
    let engine = RecommendationEngine::new(scenario.source(), scenario.config.clone())
        .unwrap_or_else(|e| panic!("{}: engine construction failed: {e}", scenario.name));
    let result = engine.recommend(scenario.client_id, scenario.evaluation_id);

    match (&scenario.expected, result) {
        (Expected::Recommendations(ids), Ok(outcome)) => {
            assert_eq!(&outcome.question_ids(), ids, "{}", scenario.name);
            let ranks: Vec<usize> = outcome.items().iter().map(|i| i.rank).collect();
            assert_eq!(ranks, (1..=ids.len()).collect::<Vec<_>>(), "{}", scenario.name);
        }
        (Expected::NoSignal(reason), Ok(outcome)) => {
            assert_eq!(outcome, RecommendOutcome::NoSignal(*reason), "{}", scenario.name);
        }
        (Expected::Error(code), Err(err)) => {
            assert_eq!(err.error_code(), code.as_str(), "{}: {err}", scenario.name);
        }
        (expected, actual) => {
            panic!("{}: expected {expected:?}, got {actual:?}", scenario.name);
        }
    }
}

#[test]
fn golden_scenarios_produce_recorded_outcomes() {
    let scenarios = load_scenarios();
    assert!(scenarios.len() >= 4, "expected the golden scenarios to be present");
    for scenario in &scenarios {
        run(scenario);
    }
}

#[test]
fn golden_scenarios_cover_every_outcome_kind() {
    let scenarios = load_scenarios();
    assert!(scenarios
        .iter()
        .any(|s| matches!(s.expected, Expected::Recommendations(_))));
    assert!(scenarios
        .iter()
        .any(|s| matches!(s.expected, Expected::NoSignal(_))));
    assert!(scenarios
        .iter()
        .any(|s| matches!(s.expected, Expected::Error(_))));
}

#[test]
fn golden_scenarios_are_stable_without_question_cache() {
    for scenario in load_scenarios() {
        let mut config = scenario.config.clone();
        config.cache_questions = false;
        let cached = RecommendationEngine::new(scenario.source(), scenario.config.clone())
            .unwrap()
            .recommend(scenario.client_id, scenario.evaluation_id)
            .ok();
        let uncached = RecommendationEngine::new(scenario.source(), config)
            .unwrap()
            .recommend(scenario.client_id, scenario.evaluation_id)
            .ok();
        assert_eq!(cached, uncached, "{}", scenario.name);
    }
}
