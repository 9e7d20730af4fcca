//! SQL for the answer source, one module per concern.

pub mod answer_query;
pub mod question_query;
pub mod relation_query;
pub mod seed_ops;
