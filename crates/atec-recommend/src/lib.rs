//! # atec-recommend
//!
//! Recommends follow-up questions for an evaluation by looking at the
//! evaluations whose answer patterns are most similar to it.
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Rating matrix | [`matrix`] | evaluation × question scores, missing cells tracked |
//! | Similarity | [`similarity`] | symmetric cosine matrix |
//! | Neighbors | [`neighbors`] | top-K most similar other evaluations |
//! | Aggregation | [`aggregate`] | per-question mean over neighbors that answered |
//! | Ranking | [`ranking`] | top-N questions by gap or by unanswered aggregate |
//!
//! Every stage is a pure function of its inputs. [`RecommendationEngine`]
//! wires them to an [`IAnswerSource`](atec_core::IAnswerSource) and joins the
//! result with question metadata from the [`QuestionCatalog`].

pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod matrix;
pub mod neighbors;
pub mod ranking;
pub mod similarity;

pub use aggregate::Aggregate;
pub use catalog::QuestionCatalog;
pub use engine::RecommendationEngine;
pub use matrix::{Cell, RatingMatrix};
pub use neighbors::{select_neighbors, Neighbor};
pub use ranking::RankedQuestion;
pub use similarity::SimilarityMatrix;
