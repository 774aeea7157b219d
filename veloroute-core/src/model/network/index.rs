//! Static nearest-node index over projected node coordinates

use geo::Coord;
use petgraph::graph::NodeIndex;
use rstar::{RTree, primitives::GeomWithData};

/// Projected node position tagged with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Bulk-loaded R-tree. There is no incremental insertion: a graph that
/// gains nodes builds a new index.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NodeIndex, Coord<f64>)>,
    {
        let items = points
            .into_iter()
            .map(|(node, coord)| IndexedPoint::new([coord.x, coord.y], node))
            .collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest node and its Euclidean distance in projected metres.
    pub fn nearest(&self, point: Coord<f64>) -> Option<(NodeIndex, f64)> {
        self.nearest_matching(point, |_| true)
    }

    /// Nearest node accepted by `filter`.
    ///
    /// Equidistant candidates resolve to the lowest node index, i.e. the
    /// node inserted first.
    pub fn nearest_matching<F>(&self, point: Coord<f64>, filter: F) -> Option<(NodeIndex, f64)>
    where
        F: Fn(NodeIndex) -> bool,
    {
        let mut best: Option<(NodeIndex, f64)> = None;

        for (item, distance_2) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[point.x, point.y])
        {
            if !filter(item.data) {
                continue;
            }
            let current = best;
            match current {
                None => best = Some((item.data, distance_2)),
                Some((_, best_2)) if distance_2 > best_2 => break,
                Some((node, _)) if item.data < node => best = Some((item.data, distance_2)),
                Some(_) => {}
            }
        }

        best.map(|(node, distance_2)| (node, distance_2.sqrt()))
    }
}
