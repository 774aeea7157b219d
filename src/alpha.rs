//! Graphs for several alpha values built from one feature set

use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, info};
use rayon::prelude::*;
use veloroute_core::prelude::*;

/// Builds one graph per alpha in parallel.
///
/// Results are returned in `alphas` order, each paired with its alpha; a
/// failing alpha does not stop the others.
pub fn explore_alphas(
    features: &[LineFeature],
    alphas: &[f64],
    config: &NetworkConfig,
) -> Vec<(f64, Result<RoutingGraph, Error>)> {
    info!("Building {} graph(s) for alpha exploration", alphas.len());
    alphas
        .par_iter()
        .map(|&alpha| {
            let config = NetworkConfig {
                alpha,
                ..config.clone()
            };
            (alpha, build_graph(features, &config))
        })
        .collect()
}

/// Lazily built graphs keyed by alpha, shared as `Arc`s.
///
/// All graphs use the same features and scoring; only alpha differs.
#[derive(Debug)]
pub struct GraphCache {
    features: Vec<LineFeature>,
    config: NetworkConfig,
    graphs: HashMap<u64, Arc<RoutingGraph>>,
}

impl GraphCache {
    pub fn new(features: Vec<LineFeature>, config: NetworkConfig) -> Self {
        Self {
            features,
            config,
            graphs: HashMap::new(),
        }
    }

    /// Cached graph for `alpha`, built on first request.
    ///
    /// # Errors
    ///
    /// Returns the build error; failed builds are not cached.
    pub fn graph(&mut self, alpha: f64) -> Result<Arc<RoutingGraph>, Error> {
        let key = alpha_key(alpha);
        if let Some(graph) = self.graphs.get(&key) {
            debug!("Graph cache hit for alpha = {alpha}");
            return Ok(Arc::clone(graph));
        }

        let config = NetworkConfig {
            alpha,
            ..self.config.clone()
        };
        let graph = Arc::new(build_graph(&self.features, &config)?);
        self.graphs.insert(key, Arc::clone(&graph));
        Ok(graph)
    }

    pub fn contains(&self, alpha: f64) -> bool {
        self.graphs.contains_key(&alpha_key(alpha))
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Drops all cached graphs; handed-out `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.graphs.clear();
    }
}

// -0.0 and 0.0 share a slot
fn alpha_key(alpha: f64) -> u64 {
    (alpha + 0.0).to_bits()
}
