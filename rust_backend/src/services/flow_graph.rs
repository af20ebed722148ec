//! Co-occurrence flow graph between a category dimension and genre.
//!
//! Every film of every yearly aggregate contributes one `(category, genre)`
//! pair per genre it lists. Identical pairs are merged into a single link
//! whose weight is the pair count. Node indices are assigned in first-seen
//! order, source before target, from one shared index space.

use std::collections::HashMap;

use crate::core::domain::Dimension;
use crate::core::models::{CategorySeries, FlowGraph, FlowLink, FlowNode};

/// Builder that interns node names and accumulates link weights.
#[derive(Debug, Default)]
struct FlowGraphBuilder {
    nodes: Vec<FlowNode>,
    node_index: HashMap<String, usize>,
    links: Vec<FlowLink>,
    link_index: HashMap<(usize, usize), usize>,
}

impl FlowGraphBuilder {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&index) = self.node_index.get(name) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(FlowNode {
            name: name.to_string(),
        });
        self.node_index.insert(name.to_string(), index);
        index
    }

    fn add_pair(&mut self, source: &str, target: &str) {
        let source = self.intern(source);
        let target = self.intern(target);
        match self.link_index.get(&(source, target)) {
            Some(&i) => self.links[i].weight += 1,
            None => {
                self.link_index.insert((source, target), self.links.len());
                self.links.push(FlowLink {
                    source,
                    target,
                    weight: 1,
                });
            }
        }
    }

    fn finish(self, source_label: &str) -> FlowGraph {
        FlowGraph {
            source_label: source_label.to_string(),
            target_label: Dimension::Genre.as_str().to_string(),
            nodes: self.nodes,
            links: self.links,
        }
    }
}

/// Build the `category -> genre` flow graph for the films of `series`.
///
/// Links keep the order in which their pair was first seen. A series without
/// films contributes nothing; with no films at all the graph is empty.
///
/// # Examples
///
/// ```
/// use movie_dash::services::flow_graph::build_flow_graph;
///
/// let graph = build_flow_graph(&[], "director");
/// assert!(graph.is_empty());
/// assert!(graph.links.is_empty());
/// ```
pub fn build_flow_graph(series: &[CategorySeries], category_label: &str) -> FlowGraph {
    let mut builder = FlowGraphBuilder::default();

    for s in series {
        for film in s.films() {
            for genre in &film.genres {
                builder.add_pair(&s.category, genre);
            }
        }
    }

    let graph = builder.finish(category_label);
    log::debug!(
        "Built {} flow graph: {} nodes, {} links, total weight {}",
        category_label,
        graph.nodes.len(),
        graph.links.len(),
        graph.total_weight()
    );
    graph
}
