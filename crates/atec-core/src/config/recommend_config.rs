use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which answers represent a neighbor when aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationScope {
    /// The neighbor's own row of the rating matrix.
    Full,
    /// Answers of the same client's later evaluations.
    Subsequent,
}

/// How aggregates are compared against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Questions the target answered where neighbors scored lower.
    Gap,
    /// Questions the target has not answered.
    Unanswered,
}

/// Sort direction for unanswered-mode aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for AggregationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "subsequent" => Ok(Self::Subsequent),
            other => Err(format!("unknown scope '{other}', expected full or subsequent")),
        }
    }
}

impl fmt::Display for AggregationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Subsequent => "subsequent",
        })
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gap" => Ok(Self::Gap),
            "unanswered" => Ok(Self::Unanswered),
            other => Err(format!("unknown mode '{other}', expected gap or unanswered")),
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gap => "gap",
            Self::Unanswered => "unanswered",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown order '{other}', expected asc or desc")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Per-request recommendation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// K: how many neighbors to aggregate over.
    pub neighbor_count: usize,
    /// Which answers stand in for each neighbor.
    pub scope: AggregationScope,
    /// Ranking strategy.
    pub mode: RankingMode,
    /// Sort direction in unanswered mode.
    pub order: SortOrder,
    /// N: maximum number of recommended questions.
    pub result_count: usize,
    /// Score assumed for an unanswered cell when computing similarity and target scores.
    pub fill_value: f64,
    /// Row cap for each neighbor's later-evaluation fetch.
    pub subsequent_limit: usize,
    /// Load question metadata once per engine instead of per request.
    pub cache_questions: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            neighbor_count: defaults::DEFAULT_NEIGHBOR_COUNT,
            scope: AggregationScope::Subsequent,
            mode: RankingMode::Gap,
            order: SortOrder::Desc,
            result_count: defaults::DEFAULT_RESULT_COUNT,
            fill_value: defaults::DEFAULT_FILL_VALUE,
            subsequent_limit: defaults::DEFAULT_SUBSEQUENT_LIMIT,
            cache_questions: defaults::DEFAULT_CACHE_QUESTIONS,
        }
    }
}

impl RecommendConfig {
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k;
        self
    }

    pub fn with_scope(mut self, scope: AggregationScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_mode(mut self, mode: RankingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_result_count(mut self, n: usize) -> Self {
        self.result_count = n;
        self
    }
}
