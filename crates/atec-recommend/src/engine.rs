//! RecommendationEngine: runs the pipeline against an answer source.

use std::sync::Arc;

use atec_core::config::{AggregationScope, RecommendConfig};
use atec_core::errors::{AtecError, AtecResult};
use atec_core::models::{
    ClientId, EvaluationId, NoSignalReason, RecommendOutcome, RecommendResponse,
};
use atec_core::traits::IAnswerSource;

use crate::aggregate::{self, Aggregate};
use crate::catalog::QuestionCatalog;
use crate::matrix::RatingMatrix;
use crate::neighbors::{select_neighbors, Neighbor};
use crate::ranking;
use crate::similarity::SimilarityMatrix;

/// Recommends follow-up questions for one evaluation at a time.
///
/// Holds no per-request state: the only shared data is the question catalog,
/// loaded at construction when `cache_questions` is on and read-only after.
pub struct RecommendationEngine<S: IAnswerSource> {
    source: S,
    config: RecommendConfig,
    catalog: Option<Arc<QuestionCatalog>>,
}

impl<S: IAnswerSource> RecommendationEngine<S> {
    /// Create an engine, validating `config` and preloading the catalog if cached.
    pub fn new(source: S, config: RecommendConfig) -> AtecResult<Self> {
        config.validate()?;
        let catalog = if config.cache_questions {
            Some(Arc::new(QuestionCatalog::load(&source)?))
        } else {
            None
        };
        Ok(Self {
            source,
            config,
            catalog,
        })
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached catalog, if caching is enabled.
    pub fn catalog(&self) -> Option<Arc<QuestionCatalog>> {
        self.catalog.clone()
    }

    /// Recommend questions for `evaluation_id` using the engine's config.
    pub fn recommend(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<RecommendOutcome> {
        self.recommend_with(client_id, evaluation_id, &self.config)
    }

    /// Same as [`recommend`](Self::recommend) with the response payload shape.
    pub fn respond(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<RecommendResponse> {
        self.recommend(client_id, evaluation_id).map(RecommendResponse::from)
    }

    /// Recommend with a per-call config override.
    ///
    /// `cache_questions: false` in `config` bypasses the cached catalog and
    /// fetches question metadata for this call. `true` uses the cache when the
    /// engine was built with one, and fetches otherwise.
    pub fn recommend_with(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
        config: &RecommendConfig,
    ) -> AtecResult<RecommendOutcome> {
        config.validate()?;
        let span = tracing::info_span!(
            "recommend",
            client_id,
            evaluation_id,
            scope = %config.scope,
            mode = %config.mode
        );
        let _guard = span.enter();

        if !self
            .source
            .evaluation_belongs_to_client(client_id, evaluation_id)?
        {
            return Err(AtecError::not_found(
                evaluation_id,
                format!("no relation to client {client_id}"),
            ));
        }

        let answers = self.source.fetch_answers(client_id, evaluation_id)?;
        let matrix = RatingMatrix::build(&answers)?;
        let Some(target) = matrix.row(evaluation_id) else {
            return Err(AtecError::not_found(evaluation_id, "no answers in the comparison set"));
        };

        let similarity = SimilarityMatrix::compute(&matrix, config.fill_value);
        let neighbors = select_neighbors(evaluation_id, &similarity, config.neighbor_count)?;
        if neighbors.is_empty() {
            tracing::info!("no neighbors in comparison set");
            return Ok(RecommendOutcome::NoSignal(NoSignalReason::NoNeighbors));
        }
        tracing::debug!(
            neighbors = ?neighbors.iter().map(|n| n.evaluation_id).collect::<Vec<_>>(),
            "selected neighbors"
        );

        let aggregate = self.aggregate(config, &matrix, &neighbors)?;
        if aggregate.is_empty() {
            tracing::info!("neighbors have no answers to aggregate");
            return Ok(RecommendOutcome::NoSignal(NoSignalReason::NoNeighborHistory));
        }

        let ranked = ranking::rank(
            config.mode,
            config.order,
            target,
            &aggregate,
            config.result_count,
        );

        let items = match (&self.catalog, config.cache_questions) {
            (Some(catalog), true) => catalog.join(&ranked),
            _ => QuestionCatalog::load(&self.source)?.join(&ranked),
        };
        if items.is_empty() {
            if ranked.is_empty() {
                tracing::info!("no qualifying questions");
            } else {
                tracing::warn!(dropped = ranked.len(), "every ranked question lacks metadata");
            }
            return Ok(RecommendOutcome::NoSignal(NoSignalReason::NoQualifyingQuestions));
        }

        tracing::info!(recommended = items.len(), "recommendation complete");
        Ok(RecommendOutcome::Recommendations(items))
    }

    fn aggregate(
        &self,
        config: &RecommendConfig,
        matrix: &RatingMatrix,
        neighbors: &[Neighbor],
    ) -> AtecResult<Aggregate> {
        match config.scope {
            AggregationScope::Full => Ok(aggregate::aggregate_full(matrix, neighbors)),
            AggregationScope::Subsequent => {
                let histories = aggregate::fetch_histories(
                    &self.source,
                    matrix,
                    neighbors,
                    config.subsequent_limit,
                )?;
                Ok(aggregate::aggregate_subsequent(&histories))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atec_core::config::RankingMode;
    use test_fixtures::InMemoryAnswerSource;

    fn source() -> InMemoryAnswerSource {
        let mut source = InMemoryAnswerSource::new();
        source
            .add_answer(1, 1, 1, 5.0)
            .add_answer(1, 1, 2, 5.0)
            .add_answer(2, 2, 1, 2.0)
            .add_answer(2, 2, 2, 4.0)
            .add_answer(2, 2, 3, 3.0)
            .add_questions_for_answers();
        source
    }

    fn full() -> RecommendConfig {
        RecommendConfig::default().with_scope(AggregationScope::Full)
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let result = RecommendationEngine::new(source(), full().with_neighbor_count(0));
        assert!(matches!(result, Err(AtecError::Config(_))));
    }

    #[test]
    fn catalog_is_loaded_once_when_cached() {
        let engine = RecommendationEngine::new(source(), full()).unwrap();
        engine.recommend(1, 1).unwrap();
        engine.recommend(1, 1).unwrap();
        assert_eq!(engine.source().question_fetches(), 1);
        assert_eq!(engine.catalog().map(|c| c.len()), Some(3));
    }

    #[test]
    fn catalog_is_fetched_per_request_when_not_cached() {
        let config = RecommendConfig {
            cache_questions: false,
            ..full()
        };
        let engine = RecommendationEngine::new(source(), config).unwrap();
        assert!(engine.catalog().is_none());
        engine.recommend(1, 1).unwrap();
        engine.recommend(1, 1).unwrap();
        assert_eq!(engine.source().question_fetches(), 2);
    }

    #[test]
    fn per_call_config_can_bypass_the_cached_catalog() {
        let engine = RecommendationEngine::new(source(), full()).unwrap();
        assert_eq!(engine.source().question_fetches(), 1);

        let uncached = RecommendConfig {
            cache_questions: false,
            ..full()
        };
        let fresh = engine.recommend_with(1, 1, &uncached).unwrap();
        assert_eq!(engine.source().question_fetches(), 2);
        assert_eq!(fresh, engine.recommend(1, 1).unwrap());
        assert_eq!(engine.source().question_fetches(), 2);
    }

    #[test]
    fn missing_metadata_for_every_candidate_is_no_qualifying_questions() {
        let mut source = InMemoryAnswerSource::new();
        source.add_answer(1, 1, 1, 5.0).add_answer(2, 2, 1, 2.0);
        let engine = RecommendationEngine::new(source, full()).unwrap();
        assert_eq!(
            engine.recommend(1, 1).unwrap(),
            RecommendOutcome::NoSignal(NoSignalReason::NoQualifyingQuestions)
        );
    }

    #[test]
    fn per_call_config_overrides_engine_config() {
        let engine = RecommendationEngine::new(source(), full()).unwrap();
        let gap = engine.recommend(1, 1).unwrap();
        assert_eq!(gap.question_ids(), vec![1, 2]);

        let unanswered = engine
            .recommend_with(1, 1, &full().with_mode(RankingMode::Unanswered))
            .unwrap();
        assert_eq!(unanswered.question_ids(), vec![3]);
        assert_eq!(unanswered.items()[0].score, 3.0);
    }

    #[test]
    fn respond_wraps_no_signal_in_a_message() {
        let mut source = InMemoryAnswerSource::new();
        source.add_answer(1, 1, 1, 3.0);
        let engine = RecommendationEngine::new(source, full()).unwrap();
        let response = engine.respond(1, 1).unwrap();
        assert_eq!(
            response,
            RecommendResponse::Message {
                message: NoSignalReason::NoNeighbors.message().to_string()
            }
        );
    }
}
