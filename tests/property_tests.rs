mod common;

use std::collections::BTreeSet;

use common::{event_log, Event, Probe};
use plangraph::{
    ExecutionCtx, GraphConfig, GraphError, NodeId, PrimitiveGraph, ReadyOrder,
    TxnControlCounters, Value,
};
use proptest::prelude::*;

/// Node count plus acyclic edges: nodes are ranked by a hidden permutation and
/// every edge points from a lower rank to a higher one.
fn arb_dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..24)
        .prop_flat_map(|n| {
            let ranks = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
            let pairs = prop::collection::vec((0..n, 0..n), 0..n * 3);
            (Just(n), ranks, pairs)
        })
        .prop_map(|(n, ranks, pairs)| {
            let edges = pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (ranks[a.min(b)], ranks[a.max(b)]))
                .collect();
            (n, edges)
        })
}

fn arb_ready_order() -> impl Strategy<Value = ReadyOrder> {
    prop_oneof![Just(ReadyOrder::Fifo), Just(ReadyOrder::Lifo)]
}

fn build(
    n: usize,
    edges: &[(usize, usize)],
    order: ReadyOrder,
    log: &common::EventLog,
) -> PrimitiveGraph {
    let config = GraphConfig {
        ready_order: order,
        ..GraphConfig::default()
    };
    let mut graph = PrimitiveGraph::with_config(config);
    for step in 0..n {
        graph.create_node(Probe::new(step, 1, log).boxed()).unwrap();
    }
    for &(from, to) in edges {
        graph
            .add_dependency(NodeId(from as u64), NodeId(to as u64), 0.0)
            .unwrap();
    }
    graph
}

fn position_of(order: &[NodeId], id: usize) -> usize {
    order.iter().position(|node| node.0 == id as u64).unwrap()
}

proptest! {
    #[test]
    fn prop_acyclic_graphs_order_every_node_once(
        (n, edges) in arb_dag(),
        order in arb_ready_order(),
    ) {
        let log = event_log();
        let mut graph = build(n, &edges, order, &log);
        graph.optimise().unwrap();
        let sorted = graph.sorted().unwrap().to_vec();

        prop_assert_eq!(sorted.len(), n);
        let distinct: BTreeSet<NodeId> = sorted.iter().copied().collect();
        prop_assert_eq!(distinct.len(), n);
        for &(from, to) in &edges {
            prop_assert!(position_of(&sorted, from) < position_of(&sorted, to));
        }
    }

    #[test]
    fn prop_execution_respects_dependencies(
        (n, edges) in arb_dag(),
        order in arb_ready_order(),
    ) {
        let log = event_log();
        let mut graph = build(n, &edges, order, &log);
        graph.optimise().unwrap();
        let last = *graph.sorted().unwrap().last().unwrap();
        let output = graph.execute(&ExecutionCtx::new()).unwrap();

        prop_assert_eq!(
            output.rows[0].get("step"),
            Some(&Value::Int(last.0 as i64))
        );

        let events = log.borrow();
        let executed_at = |step: usize| {
            events
                .iter()
                .position(|event| *event == Event::Executed { step })
                .unwrap()
        };
        let executions = events
            .iter()
            .filter(|event| matches!(event, Event::Executed { .. }))
            .count();
        prop_assert_eq!(executions, n);

        let distinct: BTreeSet<(usize, usize)> = edges.iter().copied().collect();
        let incidents = events
            .iter()
            .filter(|event| matches!(event, Event::Incident { .. }))
            .count();
        prop_assert_eq!(incidents, distinct.len());

        for &(from, to) in &distinct {
            let delivered = events
                .iter()
                .position(|event| {
                    *event == Event::Incident { step: to, from: NodeId(from as u64) }
                })
                .unwrap();
            prop_assert!(executed_at(from) < delivered);
            prop_assert!(delivered < executed_at(to));
        }
    }

    #[test]
    fn prop_cycles_are_rejected_before_execution(
        (n, edges) in arb_dag(),
        pick in any::<(usize, usize)>(),
    ) {
        prop_assume!(n >= 2);
        let log = event_log();
        let mut graph = build(n, &edges, ReadyOrder::Fifo, &log);
        let u = pick.0 % n;
        let v = (u + 1 + pick.1 % (n - 1)) % n;
        graph.add_dependency(NodeId(u as u64), NodeId(v as u64), 0.0).unwrap();
        graph.add_dependency(NodeId(v as u64), NodeId(u as u64), 0.0).unwrap();

        match graph.optimise() {
            Err(GraphError::CyclicGraph { nodes }) => {
                prop_assert!(nodes.contains(&NodeId(u as u64)));
                prop_assert!(nodes.contains(&NodeId(v as u64)));
            }
            other => prop_assert!(false, "expected cycle, got {:?}", other),
        }
        prop_assert!(matches!(
            graph.execute(&ExecutionCtx::new()),
            Err(GraphError::Unordered)
        ));
        prop_assert!(log.borrow().is_empty());
    }

    #[test]
    fn prop_duplicate_edges_collapse(
        (n, edges) in arb_dag(),
        weights in prop::collection::vec(-10.0f64..10.0, 1..4),
    ) {
        let log = event_log();
        let mut graph = build(n, &[], ReadyOrder::Fifo, &log);
        for weight in &weights {
            for &(from, to) in &edges {
                graph
                    .add_dependency(NodeId(from as u64), NodeId(to as u64), *weight)
                    .unwrap();
            }
        }
        let distinct: BTreeSet<(usize, usize)> = edges.iter().copied().collect();
        prop_assert_eq!(graph.edge_count(), distinct.len());
        prop_assert_eq!(graph.edges().count(), distinct.len());
        let latest = *weights.last().unwrap();
        for &(from, to) in &distinct {
            prop_assert_eq!(
                graph.edge_weight(NodeId(from as u64), NodeId(to as u64)),
                Some(latest)
            );
        }
    }

    #[test]
    fn prop_txn_counters_preserve_insertion_order(
        inserts in prop::collection::vec(any::<u64>(), 0..50),
    ) {
        let mut graph = PrimitiveGraph::new();
        for &insert_id in &inserts {
            graph.add_txn_control_counters(TxnControlCounters::new(1, 1, 1, insert_id));
        }
        let seen: Vec<u64> = graph
            .txn_control_counters()
            .iter()
            .map(|counters| counters.insert_id)
            .collect();
        prop_assert_eq!(seen, inserts);
    }
}
