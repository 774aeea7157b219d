use fixedbitset::FixedBitSet;
use petgraph::graph::{NodeIndex, UnGraph};

/// Members of the largest connected component and the number of
/// components. Ties go to the component holding the lowest node index.
pub(crate) fn largest_component<N, E>(graph: &UnGraph<N, E>) -> (FixedBitSet, usize) {
    let node_count = graph.node_count();
    let mut visited = FixedBitSet::with_capacity(node_count);
    let mut largest = FixedBitSet::with_capacity(node_count);
    let mut largest_len = 0;
    let mut components = 0;
    let mut stack = Vec::new();

    for start in graph.node_indices() {
        if visited.contains(start.index()) {
            continue;
        }
        components += 1;

        let mut members = FixedBitSet::with_capacity(node_count);
        let mut len = 0;
        visited.insert(start.index());
        stack.push(start);

        while let Some(node) = stack.pop() {
            members.insert(node.index());
            len += 1;
            for next in graph.neighbors(node) {
                if !visited.put(next.index()) {
                    stack.push(next);
                }
            }
        }

        if len > largest_len {
            largest_len = len;
            largest = members;
        }
    }

    (largest, components)
}

/// Copy of `graph` restricted to `keep`, preserving relative node order.
pub(crate) fn retain_nodes<N: Clone, E: Clone>(
    graph: &UnGraph<N, E>,
    keep: &FixedBitSet,
) -> UnGraph<N, E> {
    graph.filter_map(
        |idx: NodeIndex, node| keep.contains(idx.index()).then(|| node.clone()),
        |_, edge| Some(edge.clone()),
    )
}
