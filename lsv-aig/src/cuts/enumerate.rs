// SPDX-License-Identifier: Apache-2.0

//! Memoized k-feasible cut enumeration over a strashed AIG.
//!
//! Each node's cut set is computed once per `CutEnumerator` and kept in its
//! memo table. Evaluation walks the not-yet-memoized part of the requested
//! node's fanin cone leaves-first, so network depth never translates into
//! call-stack depth.

use std::collections::HashMap;

use serde::Serialize;

use crate::cuts::cut::{Cut, CutSet};
use crate::network::node::{Network, Node, NodeRef};
use crate::network::topo::postorder_for_refs_node_only;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationStats {
    /// Number of cut sets computed (one per distinct node visited).
    pub computed: usize,
    /// Number of `enumerate` calls answered straight from the memo table.
    pub memo_hits: usize,
    /// Cuts stored across all memo entries.
    pub total_cuts: usize,
}

pub struct CutEnumerator<'a> {
    network: &'a Network,
    k: usize,
    memo: HashMap<NodeRef, CutSet>,
    stats: EnumerationStats,
}

impl<'a> CutEnumerator<'a> {
    pub fn new(network: &'a Network, k: usize) -> Self {
        assert!(k >= 1, "CutEnumerator: k must be at least 1, got {}", k);
        Self {
            network,
            k,
            memo: HashMap::new(),
            stats: EnumerationStats::default(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    pub fn memo(&self) -> &HashMap<NodeRef, CutSet> {
        &self.memo
    }

    /// Returns the k-feasible cuts rooted at `node`, computing (and
    /// memoizing) the cut sets of its fanin cone as needed.
    ///
    /// Panics if the cone contains a node that is neither a primary input nor
    /// a two-input AND gate; callers validate with
    /// `Network::check_strashed_aig` first.
    pub fn enumerate(&mut self, node: NodeRef) -> &CutSet {
        if self.memo.contains_key(&node) {
            self.stats.memo_hits += 1;
            log::trace!("enumerate: memo hit for %{}", node.id);
            return &self.memo[&node];
        }
        let pending = postorder_for_refs_node_only(&[node], &self.network.nodes, &self.memo);
        for current in pending {
            let cut_set = self.compute_cut_set(current);
            log::trace!(
                "enumerate: %{} has {} cut(s) at k={}",
                current.id,
                cut_set.len(),
                self.k
            );
            self.stats.computed += 1;
            self.stats.total_cuts += cut_set.len();
            self.memo.insert(current, cut_set);
        }
        &self.memo[&node]
    }

    /// Computes the cut set of `node`; its fanins must already be memoized.
    fn compute_cut_set(&self, node: NodeRef) -> CutSet {
        match self.network.get(node) {
            Node::Input { .. } => CutSet::trivial(node),
            Node::And2 { a, b, .. } => {
                merge_fanin_cuts(node, &self.memo[&a.node], &self.memo[&b.node], self.k)
            }
            other => panic!(
                "cut enumeration reached %{} which is not a primary input or a two-input AND: {:?}",
                node.id, other
            ),
        }
    }
}

/// Builds the cut set of an AND node from the cut sets of its two fanins.
///
/// Feasible pairwise unions are de-duplicated and inserted fewest leaves
/// first (then lexicographically), each rejected if an already accepted cut
/// is a subset of it. The trivial cut of `node` is always added.
pub fn merge_fanin_cuts(node: NodeRef, cuts0: &CutSet, cuts1: &CutSet, k: usize) -> CutSet {
    let mut candidates: Vec<Cut> = Vec::new();
    for c0 in cuts0 {
        for c1 in cuts1 {
            if let Some(merged) = c0.merge_bounded(c1, k) {
                candidates.push(merged);
            }
        }
    }
    candidates.sort_by(|lhs, rhs| lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs)));
    candidates.dedup();

    let mut result = CutSet::new();
    for candidate in candidates {
        result.insert_irredundant(candidate);
    }
    result.insert_trivial(node);
    result
}
