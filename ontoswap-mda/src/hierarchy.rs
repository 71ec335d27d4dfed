//! Parent/child tables and their transitive closures.

use pathfinding::directed::bfs::bfs_reach;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Entity to directly related entities.
pub type Adjacency = BTreeMap<String, Vec<String>>;

/// Build `(children, parents)` from `(child, parent)` edges.
///
/// Self edges are dropped; only entities with at least one relation appear.
pub fn build_adjacency(edges: &[(String, String)]) -> (Adjacency, Adjacency) {
    let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut parents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (child, parent) in edges {
        if child == parent {
            warn!(entity = %child, "dropping self-referencing subclass edge");
            continue;
        }
        children
            .entry(parent.clone())
            .or_default()
            .insert(child.clone());
        parents
            .entry(child.clone())
            .or_default()
            .insert(parent.clone());
    }

    (flatten(children), flatten(parents))
}

fn flatten(map: BTreeMap<String, BTreeSet<String>>) -> Adjacency {
    map.into_iter()
        .map(|(entity, related)| (entity, related.into_iter().collect()))
        .collect()
}

/// Every entity reachable from `start` through `edges`, excluding `start`.
pub fn closure(edges: &Adjacency, start: &str) -> Vec<String> {
    let mut reached: Vec<String> = bfs_reach(start.to_string(), |entity| {
        edges.get(entity).cloned().unwrap_or_default()
    })
    .filter(|entity| entity != start)
    .collect();
    reached.sort();
    reached
}

/// Closure of every entity that has outgoing edges.
pub fn closure_index(edges: &Adjacency) -> Adjacency {
    edges
        .keys()
        .map(|entity| (entity.clone(), closure(edges, entity)))
        .collect()
}
