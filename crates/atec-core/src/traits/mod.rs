//! Seams between the recommender and its collaborators.

pub mod answer_source;

pub use answer_source::IAnswerSource;
