//! Centrality entry points: `lric`, `sric`, `interdependence`, `graphsim`.
//!
//! Each entry point copies the input, derives node attributes, builds the
//! direct-influence graph, propagates it and aggregates the result. Scores
//! are attached to the returned graph under their attribute names.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use slric_core::constants::{
    DEFAULT_INTERDEPENDENCE_QUOTA_PERCENT, DEFAULT_QUOTA_PERCENT, SCORE_INTERDEPENDENCE, SCORE_SRIC,
};
use slric_core::errors::ExportError;
use slric_core::types::Ranking;
use slric_core::{GraphParams, InfluenceGraph, SizeSpec, SlricConfig, SlricResult};
use tracing::info;

use super::aggregate::aggregate;
use super::models::{IndirectModel, InterdependenceModel};
use crate::direct::{BranchAndBoundOracle, DirectInfluenceEngine, IndexKind};
use crate::indirect::BipathReconciler;
use crate::similarity::{rank_distance, topology_distance};

/// Result of one centrality run.
#[derive(Debug, Clone, Serialize)]
pub struct CentralityReport {
    /// Score attribute name → ranking.
    pub rankings: BTreeMap<String, Ranking>,
    /// Attribute name of the headline ranking.
    pub primary: String,
    /// Derived influence graph with scores attached to its nodes.
    #[serde(skip)]
    pub graph: InfluenceGraph,
}

impl CentralityReport {
    fn new(graph: InfluenceGraph) -> Self {
        Self {
            rankings: BTreeMap::new(),
            primary: String::new(),
            graph,
        }
    }

    pub fn ranking(&self, score_name: &str) -> Option<&Ranking> {
        self.rankings.get(score_name)
    }

    pub fn primary_ranking(&self) -> Option<&Ranking> {
        self.rankings.get(&self.primary)
    }

    /// Aggregate `propagated`, store the scores on the result graph and record the ranking.
    fn record(&mut self, score_name: &str, propagated: &InfluenceGraph) {
        let scores = aggregate(propagated);
        self.graph.set_scores(score_name, &scores);
        self.rankings
            .insert(score_name.to_string(), self.graph.ranking(&scores));
        self.primary = score_name.to_string();
    }

    /// Rankings as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialize {
            message: e.to_string(),
        })
    }
}

/// Default node-attribute derivation for an entry point.
pub fn default_params(config: &SlricConfig, default_quota_percent: f64) -> GraphParams {
    GraphParams::new(
        config.influence.quota_spec(default_quota_percent),
        SizeSpec::OutDegree,
    )
}

fn direct_engine(kind: IndexKind, config: &SlricConfig) -> DirectInfluenceEngine {
    DirectInfluenceEngine::new(kind, config.influence.effective_group_size())
        .with_parallel(config.influence.effective_parallel())
        .with_oracle(Box::new(BranchAndBoundOracle::new(
            config.influence.oracle_node_budget,
        )))
}

/// Copy `input` and derive quota, size and in-degree on it.
fn prepare(input: &InfluenceGraph, params: &GraphParams) -> SlricResult<InfluenceGraph> {
    let mut graph = input.clone();
    params.apply(&mut graph)?;
    Ok(graph)
}

/// LRIC centrality with quota `influence.quota_percent` (default 20 %) and
/// size = weighted out-degree.
pub fn lric(input: &InfluenceGraph, config: &SlricConfig) -> SlricResult<CentralityReport> {
    lric_with_params(input, &default_params(config, DEFAULT_QUOTA_PERCENT), config)
}

/// LRIC centrality for every configured indirect model.
pub fn lric_with_params(
    input: &InfluenceGraph,
    params: &GraphParams,
    config: &SlricConfig,
) -> SlricResult<CentralityReport> {
    SlricConfig::validate(config)?;
    let models = IndirectModel::parse_list(&config.propagation.effective_models())?;
    let start = Instant::now();

    let graph = prepare(input, params)?;
    let direct = direct_engine(IndexKind::Lric, config).compute(&graph);

    let mut report = CentralityReport::new(direct);
    for model in IndirectModel::ALL.into_iter().filter(|m| models.contains(m)) {
        let propagator =
            model.propagator(&config.propagation, config.influence.effective_parallel());
        let propagated = propagator.propagate(&report.graph);
        report.record(model.score_name(), &propagated);
    }

    info!(
        nodes = report.graph.node_count(),
        edges = report.graph.edge_count(),
        models = ?models,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "lric centrality complete"
    );
    Ok(report)
}

/// SRIC centrality with the default node-attribute derivation.
pub fn sric(input: &InfluenceGraph, config: &SlricConfig) -> SlricResult<CentralityReport> {
    sric_with_params(input, &default_params(config, DEFAULT_QUOTA_PERCENT), config)
}

/// SRIC centrality: the direct SRIC graph aggregated without propagation.
pub fn sric_with_params(
    input: &InfluenceGraph,
    params: &GraphParams,
    config: &SlricConfig,
) -> SlricResult<CentralityReport> {
    SlricConfig::validate(config)?;
    let start = Instant::now();

    let graph = prepare(input, params)?;
    let direct = direct_engine(IndexKind::Sric, config).compute(&graph);

    let mut report = CentralityReport::new(direct.clone());
    report.record(SCORE_SRIC, &direct);

    info!(
        nodes = report.graph.node_count(),
        edges = report.graph.edge_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "sric centrality complete"
    );
    Ok(report)
}

/// Interdependence centrality with quota `influence.quota_percent` (default 50 %).
pub fn interdependence(input: &InfluenceGraph, config: &SlricConfig) -> SlricResult<CentralityReport> {
    interdependence_with_params(
        input,
        &default_params(config, DEFAULT_INTERDEPENDENCE_QUOTA_PERCENT),
        config,
    )
}

/// Interdependence centrality: LRIC influence on the input and on its
/// reverse, reconciled by the bipath recurrence. The report graph is the
/// net quality graph.
pub fn interdependence_with_params(
    input: &InfluenceGraph,
    params: &GraphParams,
    config: &SlricConfig,
) -> SlricResult<CentralityReport> {
    SlricConfig::validate(config)?;
    let model =
        InterdependenceModel::from_selector(config.propagation.effective_interdependence_model())?;
    let start = Instant::now();

    let engine = direct_engine(IndexKind::Lric, config);
    let influence = engine.compute(&prepare(input, params)?);
    let dependence = engine.compute(&prepare(&input.reversed(), params)?);

    let reconciler =
        BipathReconciler::new(model.combinator(), config.propagation.effective_path_limit());
    let quality = reconciler.reconcile(&influence, &dependence).to_graph();

    let mut report = CentralityReport::new(quality.clone());
    report.record(SCORE_INTERDEPENDENCE, &quality);

    info!(
        nodes = report.graph.node_count(),
        edges = report.graph.edge_count(),
        model = ?model,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "interdependence centrality complete"
    );
    Ok(report)
}

/// `(topology distance, ranking distance)` between two graphs.
///
/// Without rankings, both graphs go through `lric` and their LRIC graphs and
/// primary rankings are compared.
pub fn graphsim(
    g1: &InfluenceGraph,
    g2: &InfluenceGraph,
    rankings: Option<(&Ranking, &Ranking)>,
    config: &SlricConfig,
) -> SlricResult<(f64, f64)> {
    let epsilon = config.similarity.effective_epsilon();
    let method = config.similarity.effective_interval_method();
    let normalization = config.similarity.effective_topology_normalization();

    let (topology, ranking) = match rankings {
        Some((r1, r2)) => (
            topology_distance(g1, g2, normalization)?,
            rank_distance(r1, r2, epsilon, method)?,
        ),
        None => {
            let first = lric(g1, config)?;
            let second = lric(g2, config)?;
            let empty = Ranking::new();
            (
                topology_distance(&first.graph, &second.graph, normalization)?,
                rank_distance(
                    first.primary_ranking().unwrap_or(&empty),
                    second.primary_ranking().unwrap_or(&empty),
                    epsilon,
                    method,
                )?,
            )
        }
    };

    info!(topology, ranking, "graph similarity computed");
    Ok((topology, ranking))
}
