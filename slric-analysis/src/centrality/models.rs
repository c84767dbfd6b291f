//! Model selectors for the centrality entry points.

use std::fmt;
use std::str::FromStr;

use slric_core::config::PropagationConfig;
use slric_core::constants::{SCORE_LRIC_MAX, SCORE_LRIC_MAXMIN, SCORE_LRIC_PAGERANK};
use slric_core::errors::ConfigError;

use crate::indirect::{PageRankConfig, PathAggregator, PathCombinator, PersonalizedWalker, Propagation};

/// Indirect LRIC models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndirectModel {
    PageRank,
    Max,
    MaxMin,
}

impl IndirectModel {
    /// Evaluation order of the models; the last one evaluated is the primary ranking.
    pub const ALL: [IndirectModel; 3] = [Self::PageRank, Self::Max, Self::MaxMin];

    pub fn name(self) -> &'static str {
        match self {
            Self::PageRank => "pagerank",
            Self::Max => "max",
            Self::MaxMin => "maxmin",
        }
    }

    /// Node attribute the model's score is stored under.
    pub fn score_name(self) -> &'static str {
        match self {
            Self::PageRank => SCORE_LRIC_PAGERANK,
            Self::Max => SCORE_LRIC_MAX,
            Self::MaxMin => SCORE_LRIC_MAXMIN,
        }
    }

    pub fn propagator(self, config: &PropagationConfig, parallel: bool) -> Box<dyn Propagation> {
        let limit = config.effective_path_limit();
        match self {
            Self::Max => Box::new(PathAggregator::max_product(limit)),
            Self::MaxMin => Box::new(PathAggregator::max_min(limit)),
            Self::PageRank => Box::new(PersonalizedWalker::new(
                PageRankConfig {
                    damping: config.effective_damping(),
                    max_iterations: config.effective_max_iterations(),
                    tolerance: config.effective_tolerance(),
                },
                parallel,
            )),
        }
    }

    /// Parse model names, reporting the first unknown one. Duplicates collapse.
    pub fn parse_list(names: &[String]) -> Result<Vec<IndirectModel>, ConfigError> {
        let mut models: Vec<IndirectModel> = names
            .iter()
            .map(|n| n.parse())
            .collect::<Result<_, _>>()?;
        models.sort();
        models.dedup();
        Ok(models)
    }
}

impl FromStr for IndirectModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pagerank" => Ok(Self::PageRank),
            "max" => Ok(Self::Max),
            "maxmin" => Ok(Self::MaxMin),
            other => Err(ConfigError::InvalidValue {
                field: "propagation.models".to_string(),
                message: format!("unknown model '{other}'"),
            }),
        }
    }
}

impl fmt::Display for IndirectModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Path strength used by the interdependence model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterdependenceModel {
    Product,
    Min,
    Sum,
}

impl InterdependenceModel {
    /// `1` = product, `2` = min, `3` = sum.
    pub fn from_selector(selector: u8) -> Result<Self, ConfigError> {
        match selector {
            1 => Ok(Self::Product),
            2 => Ok(Self::Min),
            3 => Ok(Self::Sum),
            other => Err(ConfigError::InvalidValue {
                field: "propagation.interdependence_model".to_string(),
                message: format!("{other} is not one of 1 (product), 2 (min), 3 (sum)"),
            }),
        }
    }

    pub fn combinator(self) -> PathCombinator {
        match self {
            Self::Product => PathCombinator::Product,
            Self::Min => PathCombinator::Min,
            Self::Sum => PathCombinator::Sum,
        }
    }
}
