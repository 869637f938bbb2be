//! Topological ordering over the graph's adjacency lists.

use std::collections::{BTreeMap, VecDeque};

use crate::config::ReadyOrder;
use crate::error::{GraphError, Result};
use crate::types::NodeId;

/// Orders nodes `0..outgoing.len()` with Kahn's algorithm.
///
/// `outgoing[i]` holds the consumers of node `i`. Returns every node exactly
/// once with each producer ahead of its consumers, or
/// [`GraphError::CyclicGraph`] naming the nodes that could not be placed.
pub(crate) fn sort(outgoing: &[BTreeMap<NodeId, f64>], order: ReadyOrder) -> Result<Vec<NodeId>> {
    let node_count = outgoing.len();
    let mut in_degree = vec![0usize; node_count];
    for targets in outgoing {
        for &to in targets.keys() {
            let degree = to
                .index()
                .and_then(|idx| in_degree.get_mut(idx))
                .ok_or(GraphError::UnsupportedNodeType(to))?;
            *degree += 1;
        }
    }

    let mut ready: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, degree)| *degree == 0)
        .map(|(idx, _)| idx)
        .collect();
    let mut sorted = Vec::with_capacity(node_count);

    loop {
        let next = match order {
            ReadyOrder::Fifo => ready.pop_front(),
            ReadyOrder::Lifo => ready.pop_back(),
        };
        let Some(idx) = next else {
            break;
        };
        sorted.push(NodeId(idx as u64));
        for &to in outgoing[idx].keys() {
            // every target was resolved while counting degrees
            let target = to.0 as usize;
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                ready.push_back(target);
            }
        }
    }

    if sorted.len() != node_count {
        let nodes = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, degree)| *degree > 0)
            .map(|(idx, _)| NodeId(idx as u64))
            .collect();
        return Err(GraphError::CyclicGraph { nodes });
    }
    Ok(sorted)
}
