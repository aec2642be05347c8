// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use serde::Serialize;

/// Handle for a node in a `Network` arena.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NodeRef {
    pub id: usize,
}

/// Reference to a node as seen from a fanout edge; the edge may be inverted.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Operand {
    pub node: NodeRef,
    pub negated: bool,
}

impl Operand {
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            node: self.node,
            negated: !self.negated,
        }
    }
}

impl From<NodeRef> for Operand {
    fn from(node: NodeRef) -> Self {
        Operand {
            node,
            negated: false,
        }
    }
}

impl From<&NodeRef> for Operand {
    fn from(node: &NodeRef) -> Self {
        Operand {
            node: *node,
            negated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Constant node; only ever present at id 0 as `Literal(false)`.
    Literal(bool),
    Input {
        name: String,
    },
    And2 {
        a: Operand,
        b: Operand,
        name: Option<String>,
    },
    /// Multi-fanin node of a logic network, carrying its single-output SOP
    /// cover text (one cube per line, newline terminated).
    Logic {
        fanins: Vec<NodeRef>,
        sop: String,
        name: Option<String>,
    },
}

impl Node {
    pub fn get_fanins(&self) -> Vec<NodeRef> {
        match self {
            Node::Literal(_) | Node::Input { .. } => vec![],
            Node::And2 { a, b, .. } => vec![a.node, b.node],
            Node::Logic { fanins, .. } => fanins.clone(),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Node::Input { .. })
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Node::And2 { .. })
    }

    /// Internal nodes are the ones with fanins: AND gates and logic nodes.
    pub fn is_internal(&self) -> bool {
        matches!(self, Node::And2 { .. } | Node::Logic { .. })
    }

    pub fn get_name(&self) -> Option<&str> {
        match self {
            Node::Literal(_) => None,
            Node::Input { name } => Some(name.as_str()),
            Node::And2 { name, .. } | Node::Logic { name, .. } => name.as_deref(),
        }
    }
}

/// Structural form of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// Multi-fanin nodes with SOP covers, e.g. as read from BLIF.
    Logic,
    /// Two-input ANDs with inverted edges, built without folding/hashing.
    Aig,
    /// Structurally hashed AIG: constants folded, no duplicate AND nodes.
    Strash,
}

#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    pub operand: Operand,
}

/// A combinational network stored as an arena of nodes.
///
/// Node 0 is always the constant `Literal(false)`; primary inputs follow and
/// internal nodes come after them in creation order, so every fanin id is
/// smaller than the id of the node reading it.
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub kind: NetworkKind,
    pub nodes: Vec<Node>,
    pub inputs: Vec<NodeRef>,
    pub outputs: Vec<Output>,
}

impl Network {
    pub fn get(&self, node_ref: NodeRef) -> &Node {
        &self.nodes[node_ref.id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Display name of a node: its own name if it has one, else `n<id>`.
    pub fn node_name(&self, node_ref: NodeRef) -> String {
        match self.get(node_ref) {
            Node::Literal(value) => format!("const{}", *value as u8),
            node => node
                .get_name()
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("n{}", node_ref.id)),
        }
    }

    /// Internal nodes in ascending id order.
    pub fn internal_nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_internal())
            .map(|(id, _)| NodeRef { id })
    }

    pub fn and_nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_and())
            .map(|(id, _)| NodeRef { id })
    }

    pub fn and_count(&self) -> usize {
        self.and_nodes().count()
    }

    /// Whether nodes carry a textual SOP cover.
    pub fn has_sop(&self) -> bool {
        self.kind == NetworkKind::Logic
    }

    pub fn is_strashed(&self) -> bool {
        self.kind == NetworkKind::Strash
    }

    /// Checks that this network is a structurally hashed AIG whose AND gates
    /// read only primary inputs or other AND gates.
    ///
    /// This is the form cut enumeration requires; the error names the first
    /// offending node.
    pub fn check_strashed_aig(&self) -> Result<(), String> {
        if !self.is_strashed() {
            return Err(format!(
                "network '{}' is not a structurally hashed AIG (kind: {:?})",
                self.name, self.kind
            ));
        }
        let mut seen_pairs: HashSet<(Operand, Operand)> = HashSet::new();
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Literal(_) if id == 0 => {}
                Node::Literal(_) => {
                    return Err(format!("constant node found at %{}; expected only %0", id));
                }
                Node::Input { .. } => {}
                Node::Logic { .. } => {
                    return Err(format!("%{} is a logic node, not a two-input AND", id));
                }
                Node::And2 { a, b, .. } => {
                    for operand in [a, b] {
                        if !self.get(operand.node).is_input() && !self.get(operand.node).is_and()
                        {
                            return Err(format!(
                                "AND node %{} has fanin %{} which is neither an input nor an AND",
                                id, operand.node.id
                            ));
                        }
                    }
                    let key = if a <= b { (*a, *b) } else { (*b, *a) };
                    if !seen_pairs.insert(key) {
                        return Err(format!("AND node %{} duplicates an earlier AND node", id));
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks internal invariants, panicking if any are violated.
    /// - All fanin and output references are in bounds.
    /// - Every fanin id is smaller than the id of the node reading it.
    pub fn check_invariants_with_debug_assert(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let node_count = self.nodes.len();
        for input in &self.inputs {
            assert!(
                input.id < node_count && self.get(*input).is_input(),
                "Input reference is not an input node: {:?} (nodes.len() = {})",
                input,
                node_count
            );
        }
        for output in &self.outputs {
            assert!(
                output.operand.node.id < node_count,
                "Output '{}' reference out of bounds: {:?} (nodes.len() = {})",
                output.name,
                output.operand.node,
                node_count
            );
        }
        for (i, node) in self.nodes.iter().enumerate() {
            for fanin in node.get_fanins() {
                assert!(
                    fanin.id < i,
                    "Node %{}: fanin %{} does not precede it (nodes.len() = {})",
                    i,
                    fanin.id,
                    node_count
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::{BuilderOptions, NetworkBuilder};
    use crate::test_utils::setup_simple_graph;

    #[test]
    fn test_node_names_default_to_id() {
        let tg = setup_simple_graph();
        assert_eq!(tg.g.node_name(tg.i0.node), "i0");
        assert_eq!(tg.g.node_name(tg.a.node), format!("n{}", tg.a.node.id));
        assert_eq!(tg.g.node_name(NodeRef { id: 0 }), "const0");
    }

    #[test]
    fn test_internal_nodes_are_ascending_ands() {
        let tg = setup_simple_graph();
        let internal: Vec<NodeRef> = tg.g.internal_nodes().collect();
        assert_eq!(
            internal,
            vec![tg.a.node, tg.b.node, tg.c.node, tg.o.node],
        );
        assert_eq!(tg.g.and_count(), 4);
    }

    #[test]
    fn test_check_strashed_aig_accepts_builder_output() {
        let tg = setup_simple_graph();
        assert!(tg.g.is_strashed());
        assert_eq!(tg.g.check_strashed_aig(), Ok(()));
    }

    #[test]
    fn test_check_strashed_aig_rejects_unhashed_network() {
        let mut nb = NetworkBuilder::new_aig("g".to_string(), BuilderOptions::no_opt());
        let a = nb.add_input("a".to_string());
        let b = nb.add_input("b".to_string());
        let o = nb.add_and_binary(a, b);
        nb.add_output("o".to_string(), o);
        let g = nb.build();
        assert_eq!(g.kind, NetworkKind::Aig);
        let err = g.check_strashed_aig().unwrap_err();
        assert!(err.contains("not a structurally hashed AIG"), "{}", err);
    }

    #[test]
    fn test_check_strashed_aig_rejects_constant_fanin() {
        let mut g = setup_simple_graph().g;
        let extra = NodeRef { id: g.nodes.len() };
        g.nodes.push(Node::And2 {
            a: Operand::from(NodeRef { id: 0 }),
            b: Operand::from(NodeRef { id: 1 }),
            name: None,
        });
        let err = g.check_strashed_aig().unwrap_err();
        assert!(err.contains(&format!("%{}", extra.id)), "{}", err);
    }

    #[test]
    fn test_check_strashed_aig_rejects_duplicate_and() {
        let mut g = setup_simple_graph().g;
        let dup = g.nodes[g.inputs.len() + 1].clone();
        g.nodes.push(dup);
        let err = g.check_strashed_aig().unwrap_err();
        assert!(err.contains("duplicates"), "{}", err);
    }
}
