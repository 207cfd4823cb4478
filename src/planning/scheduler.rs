use std::collections::{BTreeSet, HashMap, HashSet};

use super::graph::PrerequisiteGraph;
use super::Concept;

/// Kahn-style traversal that yields one layer of learnable concepts at a time.
///
/// Pulling a layer marks its concepts visited and releases their successors into
/// the next frontier, so a consumer that stops early never pays for later layers.
/// Concepts on (or behind) a cycle never reach in-degree zero and are never yielded.
/// Each layer is ordered by concept name.
pub struct LayeredScheduler<'g> {
    graph: &'g PrerequisiteGraph,
    in_degree: HashMap<&'g str, usize>,
    visited: HashSet<&'g str>,
    frontier: BTreeSet<&'g str>,
}

impl<'g> LayeredScheduler<'g> {
    pub fn new(graph: &'g PrerequisiteGraph) -> Self {
        let in_degree = graph.in_degrees();
        let frontier = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(concept, _)| *concept)
            .collect();

        Self {
            graph,
            in_degree,
            visited: HashSet::new(),
            frontier,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn visit(&mut self, concept: &'g str) -> bool {
        if !self.visited.insert(concept) {
            return false;
        }

        let graph = self.graph;
        for successor in graph.successors(concept) {
            let successor = successor.as_str();
            if let Some(degree) = self.in_degree.get_mut(successor) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 && !self.visited.contains(successor) {
                    self.frontier.insert(successor);
                }
            }
        }
        true
    }
}

impl Iterator for LayeredScheduler<'_> {
    type Item = Vec<Concept>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() {
            return None;
        }

        let current = std::mem::take(&mut self.frontier);
        let mut layer = Vec::with_capacity(current.len());
        for concept in current {
            if self.visit(concept) {
                layer.push(concept.to_string());
            }
        }
        Some(layer)
    }
}

/// Materializes every layer; mastery plays no part in the order.
pub fn schedule(graph: &PrerequisiteGraph) -> Vec<Vec<Concept>> {
    LayeredScheduler::new(graph).collect()
}
