// SPDX-License-Identifier: Apache-2.0

//! The `NetworkBuilder` builds up a `Network` arena as nodes are added.
//!
//! An AIG builder can be created with "folding" (constant propagation and
//! trivial AND simplification) and "hashing" (structural hashing of AND nodes)
//! on or off. With both on, the resulting network is in strashed form, which
//! is what cut enumeration requires. "Off" is mostly useful for tests and for
//! loading files verbatim.
//!
//! Basic example usage:
//! ```
//! use lsv_aig::network::builder::{BuilderOptions, NetworkBuilder};
//! use lsv_aig::network::{Network, Operand};
//!
//! let mut builder = NetworkBuilder::new_aig("my_and_gate".to_string(), BuilderOptions::opt());
//! let a: Operand = builder.add_input("a".to_string());
//! let b: Operand = builder.add_input("b".to_string());
//! let o: Operand = builder.add_and_binary(a, b);
//! builder.add_output("o".to_string(), o);
//! let network: Network = builder.build();
//! assert!(network.is_strashed());
//! ```

use std::collections::HashMap;

use crate::network::node::{Network, NetworkKind, Node, NodeRef, Operand, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    pub fold: bool,
    pub hash: bool,
}

impl BuilderOptions {
    /// Returns the "optimizing" options with folding and hashing enabled.
    pub fn opt() -> Self {
        Self {
            fold: true,
            hash: true,
        }
    }

    pub fn no_opt() -> Self {
        Self {
            fold: false,
            hash: false,
        }
    }
}

pub struct NetworkBuilder {
    pub name: String,
    pub kind: NetworkKind,
    pub nodes: Vec<Node>,
    pub inputs: Vec<NodeRef>,
    pub outputs: Vec<Output>,
    pub options: BuilderOptions,
    /// Unordered fanin pair to the AND node computing it.
    strash_table: Option<HashMap<(Operand, Operand), NodeRef>>,
}

impl NetworkBuilder {
    pub fn new_aig(name: String, options: BuilderOptions) -> Self {
        let kind = if options.fold && options.hash {
            NetworkKind::Strash
        } else {
            NetworkKind::Aig
        };
        Self {
            name,
            kind,
            nodes: vec![Node::Literal(false)],
            inputs: Vec::new(),
            outputs: Vec::new(),
            options,
            strash_table: if options.hash {
                Some(HashMap::new())
            } else {
                None
            },
        }
    }

    /// Creates a builder for a logic network whose internal nodes carry SOP
    /// covers instead of being AND gates.
    pub fn new_logic(name: String) -> Self {
        Self {
            name,
            kind: NetworkKind::Logic,
            nodes: vec![Node::Literal(false)],
            inputs: Vec::new(),
            outputs: Vec::new(),
            options: BuilderOptions::no_opt(),
            strash_table: None,
        }
    }

    pub fn build(self) -> Network {
        let network = Network {
            name: self.name,
            kind: self.kind,
            nodes: self.nodes,
            inputs: self.inputs,
            outputs: self.outputs,
        };
        network.check_invariants_with_debug_assert();
        network
    }

    pub fn get_false(&self) -> Operand {
        Operand {
            node: NodeRef { id: 0 },
            negated: false,
        }
    }

    pub fn get_true(&self) -> Operand {
        Operand {
            node: NodeRef { id: 0 },
            negated: true,
        }
    }

    pub fn is_known_false(&self, operand: Operand) -> bool {
        operand.node.id == 0 && !operand.negated
    }

    pub fn is_known_true(&self, operand: Operand) -> bool {
        operand.node.id == 0 && operand.negated
    }

    /// Adds a primary input. Inputs must all be added before any internal
    /// node so that inputs occupy the ids directly after the constant.
    pub fn add_input(&mut self, name: String) -> Operand {
        debug_assert!(
            self.nodes.iter().all(|n| !n.is_internal()),
            "add_input: inputs must be added before internal nodes"
        );
        let node_ref = NodeRef {
            id: self.nodes.len(),
        };
        self.nodes.push(Node::Input { name });
        self.inputs.push(node_ref);
        node_ref.into()
    }

    pub fn add_output(&mut self, name: String, operand: Operand) {
        self.validate_operand(operand);
        self.outputs.push(Output { name, operand });
    }

    /// Attaches a name to an internal node; used by loaders that carry net
    /// names.
    pub fn set_name(&mut self, node_ref: NodeRef, new_name: String) {
        match &mut self.nodes[node_ref.id] {
            Node::And2 { name, .. } | Node::Logic { name, .. } => *name = Some(new_name),
            Node::Input { name } => *name = new_name,
            Node::Literal(_) => {}
        }
    }

    pub fn add_not(&mut self, arg: Operand) -> Operand {
        arg.negate()
    }

    pub fn add_and_binary(&mut self, lhs: Operand, rhs: Operand) -> Operand {
        assert!(
            self.kind != NetworkKind::Logic,
            "add_and_binary: cannot add AND gates to a logic network"
        );
        self.validate_operand(lhs);
        self.validate_operand(rhs);
        if self.options.fold {
            if self.is_known_false(lhs) || self.is_known_false(rhs) {
                return self.get_false();
            }
            if self.is_known_true(lhs) {
                return rhs;
            }
            if self.is_known_true(rhs) {
                return lhs;
            }
            // x & x == x
            if lhs == rhs {
                return lhs;
            }
            // x & !x == 0
            if lhs.node == rhs.node {
                return self.get_false();
            }
        }
        let key = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
        if let Some(table) = &self.strash_table {
            if let Some(existing) = table.get(&key) {
                return (*existing).into();
            }
        }
        let node_ref = NodeRef {
            id: self.nodes.len(),
        };
        self.nodes.push(Node::And2 {
            a: lhs,
            b: rhs,
            name: None,
        });
        if let Some(table) = &mut self.strash_table {
            table.insert(key, node_ref);
        }
        node_ref.into()
    }

    pub fn add_or_binary(&mut self, lhs: Operand, rhs: Operand) -> Operand {
        let not_lhs = self.add_not(lhs);
        let not_rhs = self.add_not(rhs);
        let and = self.add_and_binary(not_lhs, not_rhs);
        self.add_not(and)
    }

    pub fn add_xor_binary(&mut self, lhs: Operand, rhs: Operand) -> Operand {
        let not_rhs = self.add_not(rhs);
        let not_lhs = self.add_not(lhs);
        let lhs_only = self.add_and_binary(lhs, not_rhs);
        let rhs_only = self.add_and_binary(not_lhs, rhs);
        self.add_or_binary(lhs_only, rhs_only)
    }

    /// Adds a logic-network node computing the SOP cover `sop` over `fanins`.
    pub fn add_logic_node(&mut self, fanins: Vec<NodeRef>, sop: String) -> NodeRef {
        assert_eq!(
            self.kind,
            NetworkKind::Logic,
            "add_logic_node: only logic networks carry SOP nodes"
        );
        for fanin in &fanins {
            self.validate_ref(*fanin);
        }
        let node_ref = NodeRef {
            id: self.nodes.len(),
        };
        self.nodes.push(Node::Logic {
            fanins,
            sop,
            name: None,
        });
        node_ref
    }

    /// Debug helper: checks that the given NodeRef is in-bounds for this
    /// builder.
    pub fn validate_ref(&self, node_ref: NodeRef) {
        let count = self.nodes.len();
        assert!(
            node_ref.id < count,
            "NodeRef out of bounds: {:?} (nodes.len() = {})",
            node_ref,
            count
        );
    }

    pub fn validate_operand(&self, operand: Operand) {
        self.validate_ref(operand.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::sim::eval;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strash_reuses_commuted_and() {
        let mut nb = NetworkBuilder::new_aig("g".to_string(), BuilderOptions::opt());
        let a = nb.add_input("a".to_string());
        let b = nb.add_input("b".to_string());
        let ab = nb.add_and_binary(a, b);
        let ba = nb.add_and_binary(b, a);
        assert_eq!(ab, ba);
        let not_ab = nb.add_and_binary(a.negate(), b);
        assert_ne!(ab, not_ab);
        nb.add_output("o".to_string(), ab);
        let g = nb.build();
        assert_eq!(g.and_count(), 2);
    }

    #[test]
    fn test_no_opt_keeps_duplicates() {
        let mut nb = NetworkBuilder::new_aig("g".to_string(), BuilderOptions::no_opt());
        let a = nb.add_input("a".to_string());
        let b = nb.add_input("b".to_string());
        let ab = nb.add_and_binary(a, b);
        let ba = nb.add_and_binary(b, a);
        assert_ne!(ab, ba);
        let f = nb.get_false();
        let af = nb.add_and_binary(a, f);
        assert_eq!(af.node.id, 5);
        nb.add_output("o".to_string(), af);
        assert_eq!(nb.build().kind, NetworkKind::Aig);
    }

    #[test]
    fn test_fold_trivial_ands() {
        let mut nb = NetworkBuilder::new_aig("g".to_string(), BuilderOptions::opt());
        let a = nb.add_input("a".to_string());
        let t = nb.get_true();
        let f = nb.get_false();
        assert_eq!(nb.add_and_binary(a, t), a);
        assert_eq!(nb.add_and_binary(f, a), f);
        assert_eq!(nb.add_and_binary(a, a), a);
        assert_eq!(nb.add_and_binary(a, a.negate()), f);
        assert_eq!(nb.nodes.len(), 2);
    }

    #[test]
    fn test_xor_truth_table() {
        let mut nb = NetworkBuilder::new_aig("xor".to_string(), BuilderOptions::opt());
        let a = nb.add_input("a".to_string());
        let b = nb.add_input("b".to_string());
        let x = nb.add_xor_binary(a, b);
        nb.add_output("x".to_string(), x);
        let g = nb.build();
        for aa in [false, true] {
            for bb in [false, true] {
                assert_eq!(eval(&g, &[aa, bb]), vec![aa ^ bb], "a={} b={}", aa, bb);
            }
        }
    }

    #[test]
    fn test_logic_node_names() {
        let mut nb = NetworkBuilder::new_logic("m".to_string());
        let a = nb.add_input("a".to_string());
        let b = nb.add_input("b".to_string());
        let n = nb.add_logic_node(vec![a.node, b.node], "11 1\n".to_string());
        nb.set_name(n, "y".to_string());
        nb.add_output("y".to_string(), n.into());
        let g = nb.build();
        assert!(g.has_sop());
        assert_eq!(g.node_name(n), "y");
        assert_eq!(g.internal_nodes().collect::<Vec<_>>(), vec![n]);
    }
}
