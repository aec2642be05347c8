// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::network::node::NodeRef;

/// A set of leaf nodes, stored sorted and duplicate-free.
///
/// The derived ordering compares the sorted leaf sequences lexicographically,
/// which is the order cuts are reported in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Cut {
    leaves: Vec<NodeRef>,
}

impl Cut {
    pub fn new(leaves: impl IntoIterator<Item = NodeRef>) -> Self {
        let mut leaves: Vec<NodeRef> = leaves.into_iter().collect();
        leaves.sort();
        leaves.dedup();
        Self { leaves }
    }

    /// The cut containing only `node` itself.
    pub fn trivial(node: NodeRef) -> Self {
        Self { leaves: vec![node] }
    }

    pub fn leaves(&self) -> &[NodeRef] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        self.leaves.binary_search(&node).is_ok()
    }

    /// Returns the union of `self` and `other`, or `None` as soon as the union
    /// would hold more than `k` leaves.
    pub fn merge_bounded(&self, other: &Cut, k: usize) -> Option<Cut> {
        let (lhs, rhs) = (&self.leaves, &other.leaves);
        let mut leaves = Vec::with_capacity(std::cmp::min(lhs.len() + rhs.len(), k));
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() || j < rhs.len() {
            let next = if j == rhs.len() || (i < lhs.len() && lhs[i] < rhs[j]) {
                i += 1;
                lhs[i - 1]
            } else if i == lhs.len() || rhs[j] < lhs[i] {
                j += 1;
                rhs[j - 1]
            } else {
                i += 1;
                j += 1;
                lhs[i - 1]
            };
            if leaves.len() == k {
                return None;
            }
            leaves.push(next);
        }
        Some(Cut { leaves })
    }

    /// Whether every leaf of `self` is also a leaf of `other` (equal cuts
    /// count as subsets).
    pub fn is_subset_of(&self, other: &Cut) -> bool {
        if self.leaves.len() > other.leaves.len() {
            return false;
        }
        let mut other_iter = other.leaves.iter();
        'leaves: for leaf in &self.leaves {
            for candidate in other_iter.by_ref() {
                if candidate == leaf {
                    continue 'leaves;
                }
                if candidate > leaf {
                    return false;
                }
            }
            return false;
        }
        true
    }
}

impl fmt::Display for Cut {
    /// Space-separated ascending leaf ids, e.g. `1 2 5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leaf) in self.leaves.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", leaf.id)?;
        }
        Ok(())
    }
}

/// The cuts computed for one node.
///
/// Insertion through `insert_irredundant` rejects a cut when a member already
/// present is a subset of it; members are never removed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutSet {
    cuts: BTreeSet<Cut>,
}

impl CutSet {
    pub fn new() -> Self {
        Self {
            cuts: BTreeSet::new(),
        }
    }

    /// `{ {node} }`
    pub fn trivial(node: NodeRef) -> Self {
        let mut cuts = BTreeSet::new();
        cuts.insert(Cut::trivial(node));
        Self { cuts }
    }

    /// Inserts `cut` unless a member is a subset of it. Returns whether the
    /// cut was added.
    pub fn insert_irredundant(&mut self, cut: Cut) -> bool {
        if self.cuts.iter().any(|existing| existing.is_subset_of(&cut)) {
            return false;
        }
        self.cuts.insert(cut)
    }

    /// Inserts the trivial cut of `node` unconditionally.
    pub fn insert_trivial(&mut self, node: NodeRef) {
        self.cuts.insert(Cut::trivial(node));
    }

    pub fn contains(&self, cut: &Cut) -> bool {
        self.cuts.contains(cut)
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Iterates cuts in ascending (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = &Cut> {
        self.cuts.iter()
    }
}

impl<'a> IntoIterator for &'a CutSet {
    type Item = &'a Cut;
    type IntoIter = std::collections::btree_set::Iter<'a, Cut>;

    fn into_iter(self) -> Self::IntoIter {
        self.cuts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cut(ids: &[usize]) -> Cut {
        Cut::new(ids.iter().map(|id| NodeRef { id: *id }))
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        assert_eq!(cut(&[5, 1, 3, 1]).leaves(), cut(&[1, 3, 5]).leaves());
        assert_eq!(cut(&[5, 1, 3]).to_string(), "1 3 5");
    }

    #[test_case(&[1, 2], &[2, 3], 3, Some(&[1, 2, 3]); "fits exactly")]
    #[test_case(&[1, 2], &[3, 4], 3, None; "too many leaves")]
    #[test_case(&[1, 2], &[1, 2], 2, Some(&[1, 2]); "identical")]
    #[test_case(&[4], &[1, 2, 3], 4, Some(&[1, 2, 3, 4]); "disjoint")]
    #[test_case(&[1, 3, 5], &[2, 4], 4, None; "interleaved overflow")]
    fn test_merge_bounded(lhs: &[usize], rhs: &[usize], k: usize, want: Option<&[usize]>) {
        let got = cut(lhs).merge_bounded(&cut(rhs), k);
        assert_eq!(got, want.map(cut));
    }

    #[test_case(&[1], &[1, 2], true; "proper subset")]
    #[test_case(&[1, 2], &[1, 2], true; "equal")]
    #[test_case(&[2, 3], &[1, 2, 4], false; "missing leaf")]
    #[test_case(&[1, 2, 3], &[1, 2], false; "larger")]
    #[test_case(&[4], &[1, 2, 3], false; "beyond end")]
    fn test_is_subset_of(lhs: &[usize], rhs: &[usize], want: bool) {
        assert_eq!(cut(lhs).is_subset_of(&cut(rhs)), want);
    }

    #[test]
    fn test_cut_order_is_lexicographic() {
        let mut cuts = vec![cut(&[2]), cut(&[1, 3]), cut(&[1, 2, 9]), cut(&[1])];
        cuts.sort();
        assert_eq!(
            cuts,
            vec![cut(&[1]), cut(&[1, 2, 9]), cut(&[1, 3]), cut(&[2])]
        );
    }

    #[test]
    fn test_insert_irredundant_rejects_supersets_only() {
        let mut set = CutSet::new();
        assert!(set.insert_irredundant(cut(&[1, 2])));
        assert!(!set.insert_irredundant(cut(&[1, 2, 3])));
        assert!(!set.insert_irredundant(cut(&[1, 2])));
        assert!(set.insert_irredundant(cut(&[2, 3])));
        // A smaller cut inserted later does not evict existing supersets.
        assert!(set.insert_irredundant(cut(&[2])));
        assert!(set.contains(&cut(&[2, 3])));
        assert_eq!(set.len(), 3);
    }
}
