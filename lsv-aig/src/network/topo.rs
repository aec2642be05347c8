// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, VecDeque};

use crate::network::node::{Node, NodeRef};

/// Postorder traversal from `starts` that deduplicates by node and skips any
/// node already present in `cache` (and, with it, that node's fanin cone).
///
/// The traversal is worklist-based so deep networks cannot overflow the
/// stack.
pub fn postorder_for_refs_node_only(
    starts: &[NodeRef],
    nodes: &[Node],
    cache: &HashMap<NodeRef, impl Sized>,
) -> Vec<NodeRef> {
    let mut worklist: Vec<NodeRef> = starts.to_vec();
    let mut visited = vec![false; nodes.len()];
    let mut postorder = Vec::new();
    while let Some(current) = worklist.pop() {
        if cache.contains_key(&current) || visited[current.id] {
            continue;
        }
        let node = &nodes[current.id];
        let mut all_deps_visited = true;
        for dep in node.get_fanins() {
            if !cache.contains_key(&dep) && !visited[dep.id] {
                worklist.push(current); // Revisit after dependencies
                worklist.push(dep);
                all_deps_visited = false;
                break;
            }
        }
        if all_deps_visited {
            visited[current.id] = true;
            postorder.push(current);
        }
    }
    postorder
}

/// Returns (topological order, None) if acyclic, or (partial order,
/// Some(not_visited_nodes)) if a cycle is detected.
pub fn topo_order_and_cycle_check(nodes: &[Node]) -> (Vec<NodeRef>, Option<Vec<usize>>) {
    let node_count = nodes.len();
    let mut indegree = vec![0usize; node_count];
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (i, node) in nodes.iter().enumerate() {
        for fanin in node.get_fanins() {
            indegree[i] += 1;
            parents[fanin.id].push(i);
        }
    }
    let mut queue: VecDeque<usize> = (0..node_count).filter(|i| indegree[*i] == 0).collect();
    let mut topo: Vec<NodeRef> = Vec::with_capacity(node_count);
    while let Some(node_id) = queue.pop_front() {
        topo.push(NodeRef { id: node_id });
        for &parent in &parents[node_id] {
            indegree[parent] -= 1;
            if indegree[parent] == 0 {
                queue.push_back(parent);
            }
        }
    }
    if topo.len() != node_count {
        let mut seen = vec![false; node_count];
        for r in &topo {
            seen[r.id] = true;
        }
        let not_visited: Vec<usize> = (0..node_count).filter(|id| !seen[*id]).collect();
        (topo, Some(not_visited))
    } else {
        (topo, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::Operand;
    use crate::test_utils::setup_simple_graph;

    #[test]
    fn test_postorder_visits_fanins_first() {
        let tg = setup_simple_graph();
        let cache: HashMap<NodeRef, ()> = HashMap::new();
        let order = postorder_for_refs_node_only(&[tg.o.node], &tg.g.nodes, &cache);
        let position = |r: NodeRef| order.iter().position(|x| *x == r).unwrap();
        assert_eq!(order.last(), Some(&tg.o.node));
        assert!(position(tg.a.node) < position(tg.o.node));
        assert!(position(tg.b.node) < position(tg.o.node));
        assert!(position(tg.i1.node) < position(tg.a.node));
        // i1 feeds both a and b but is only listed once; c is not in the cone.
        assert_eq!(order.iter().filter(|r| **r == tg.i1.node).count(), 1);
        assert!(!order.contains(&tg.c.node));
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_postorder_stops_at_cached_nodes() {
        let tg = setup_simple_graph();
        let mut cache: HashMap<NodeRef, ()> = HashMap::new();
        cache.insert(tg.a.node, ());
        let order = postorder_for_refs_node_only(&[tg.o.node], &tg.g.nodes, &cache);
        assert!(!order.contains(&tg.a.node));
        assert!(!order.contains(&tg.i0.node));
        assert_eq!(order, vec![tg.i1.node, tg.i2.node, tg.b.node, tg.o.node]);
    }

    #[test]
    fn test_postorder_handles_deep_chain() {
        let depth = 200_000;
        let mut nodes = Vec::with_capacity(depth + 2);
        nodes.push(Node::Literal(false));
        nodes.push(Node::Input {
            name: "a".to_string(),
        });
        for i in 2..depth + 2 {
            nodes.push(Node::And2 {
                a: Operand::from(NodeRef { id: i - 1 }),
                b: Operand::from(NodeRef { id: 1 }),
                name: None,
            });
        }
        let cache: HashMap<NodeRef, ()> = HashMap::new();
        let order = postorder_for_refs_node_only(&[NodeRef { id: depth + 1 }], &nodes, &cache);
        assert_eq!(order.len(), depth + 1);
        assert_eq!(order[0], NodeRef { id: 1 });
    }

    #[test]
    fn test_topo_order_simple_graph() {
        let tg = setup_simple_graph();
        let (order, cycle) = topo_order_and_cycle_check(&tg.g.nodes);
        assert_eq!(cycle, None);
        assert_eq!(order.len(), tg.g.nodes.len());
        let position = |r: NodeRef| order.iter().position(|x| *x == r).unwrap();
        assert!(position(tg.a.node) < position(tg.o.node));
        assert!(position(tg.i3.node) < position(tg.c.node));
    }

    #[test]
    fn test_cycle_is_reported() {
        let nodes = vec![
            Node::Literal(false),
            Node::And2 {
                a: Operand::from(NodeRef { id: 2 }),
                b: Operand::from(NodeRef { id: 0 }),
                name: None,
            },
            Node::And2 {
                a: Operand::from(NodeRef { id: 1 }),
                b: Operand::from(NodeRef { id: 0 }),
                name: None,
            },
        ];
        let (order, cycle) = topo_order_and_cycle_check(&nodes);
        assert_eq!(order, vec![NodeRef { id: 0 }]);
        assert_eq!(cycle, Some(vec![1, 2]));
    }
}
