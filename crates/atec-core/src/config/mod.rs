//! Configuration system for ATEC.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod atec_config;
pub mod defaults;
pub mod observability_config;
pub mod recommend_config;
pub mod storage_config;

pub use atec_config::AtecConfig;
pub use observability_config::ObservabilityConfig;
pub use recommend_config::{AggregationScope, RankingMode, RecommendConfig, SortOrder};
pub use storage_config::StorageConfig;
