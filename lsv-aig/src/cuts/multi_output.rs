// SPDX-License-Identifier: Apache-2.0

//! Groups the cuts of every node in a network by leaf set, yielding the cuts
//! shared by several nodes ("multi-output cuts").

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::cuts::cut::Cut;
use crate::cuts::enumerate::{CutEnumerator, EnumerationStats};
use crate::lsv_error::UsageError;
use crate::network::node::{Network, Node, NodeRef};

pub const K_RANGE: RangeInclusive<usize> = 3..=6;
pub const L_RANGE: RangeInclusive<usize> = 1..=4;

/// Validated `(k, l)` pair: `k` bounds the cut size, `l` is the minimum
/// number of nodes a cut must feed to be reported.
///
/// The fields are private so that a value only exists once both are in
/// range; `multi_output_cuts` takes nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultiOutputCutParams {
    k: usize,
    l: usize,
}

impl MultiOutputCutParams {
    pub fn new(k: usize, l: usize) -> Result<Self, UsageError> {
        check_range("k", k as i64, &K_RANGE)?;
        check_range("l", l as i64, &L_RANGE)?;
        Ok(Self { k, l })
    }

    /// Parses `k` and `l` from their textual form. A value that is an integer
    /// but outside its range is reported as out of range rather than as a
    /// parse failure.
    pub fn parse(k: &str, l: &str) -> Result<Self, UsageError> {
        let k = parse_bounded("k", k, &K_RANGE)?;
        let l = parse_bounded("l", l, &L_RANGE)?;
        Ok(Self { k, l })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn l(&self) -> usize {
        self.l
    }
}

fn check_range(
    name: &'static str,
    value: i64,
    range: &RangeInclusive<usize>,
) -> Result<(), UsageError> {
    if value < *range.start() as i64 || value > *range.end() as i64 {
        return Err(UsageError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn parse_bounded(
    name: &'static str,
    text: &str,
    range: &RangeInclusive<usize>,
) -> Result<usize, UsageError> {
    let value: i64 = text.trim().parse().map_err(|_| UsageError::NotAnInteger {
        name,
        value: text.to_string(),
    })?;
    check_range(name, value, range)?;
    Ok(value as usize)
}

/// Every cut of every node at one `k`, keyed by leaf set.
#[derive(Debug, Clone)]
pub struct CutAggregation {
    pub k: usize,
    outputs_by_cut: BTreeMap<Cut, BTreeSet<NodeRef>>,
    pub stats: EnumerationStats,
}

impl CutAggregation {
    /// Number of distinct cuts seen.
    pub fn len(&self) -> usize {
        self.outputs_by_cut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs_by_cut.is_empty()
    }

    /// The nodes whose cut sets contain `cut`.
    pub fn outputs_of(&self, cut: &Cut) -> Option<&BTreeSet<NodeRef>> {
        self.outputs_by_cut.get(cut)
    }

    /// Cuts feeding at least `l` nodes, in ascending leaf order.
    pub fn qualifying(&self, l: usize) -> impl Iterator<Item = (&Cut, &BTreeSet<NodeRef>)> + '_ {
        self.outputs_by_cut
            .iter()
            .filter(move |(_, outputs)| outputs.len() >= l)
    }

    pub fn report(&self, l: usize) -> MultiOutputCutReport {
        let entries = self
            .qualifying(l)
            .map(|(cut, outputs)| MultiOutputCutEntry {
                leaves: cut.leaves().to_vec(),
                outputs: outputs.iter().copied().collect(),
            })
            .collect();
        MultiOutputCutReport {
            k: self.k,
            l,
            entries,
            stats: self.stats,
        }
    }
}

/// Enumerates the `k`-feasible cuts of every AND node of `network` and
/// inverts the node to cuts relation. Each primary input is registered under
/// its own trivial cut.
///
/// `network` must be a strashed AIG (see `Network::check_strashed_aig`);
/// logic nodes make this panic.
pub fn aggregate_cuts(network: &Network, k: usize) -> CutAggregation {
    let mut enumerator = CutEnumerator::new(network, k);
    let mut outputs_by_cut: BTreeMap<Cut, BTreeSet<NodeRef>> = BTreeMap::new();
    for (id, node) in network.nodes.iter().enumerate() {
        let node_ref = NodeRef { id };
        match node {
            Node::Literal(_) => {}
            Node::Input { .. } => {
                outputs_by_cut
                    .entry(Cut::trivial(node_ref))
                    .or_default()
                    .insert(node_ref);
            }
            Node::And2 { .. } => {
                for cut in enumerator.enumerate(node_ref).iter() {
                    outputs_by_cut
                        .entry(cut.clone())
                        .or_default()
                        .insert(node_ref);
                }
            }
            Node::Logic { .. } => panic!(
                "aggregate_cuts: %{} is a logic node; the network must be strashed first",
                id
            ),
        }
    }
    let stats = enumerator.stats();
    log::debug!(
        "aggregate_cuts: network={} k={} nodes={} distinct_cuts={} computed={} memo_hits={} total_cuts={}",
        network.name,
        k,
        network.node_count(),
        outputs_by_cut.len(),
        stats.computed,
        stats.memo_hits,
        stats.total_cuts
    );
    CutAggregation {
        k: enumerator.k(),
        outputs_by_cut,
        stats,
    }
}

/// Runs the whole analysis for one `(k, l)` pair.
pub fn multi_output_cuts(network: &Network, params: &MultiOutputCutParams) -> MultiOutputCutReport {
    aggregate_cuts(network, params.k()).report(params.l())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiOutputCutEntry {
    pub leaves: Vec<NodeRef>,
    pub outputs: Vec<NodeRef>,
}

impl fmt::Display for MultiOutputCutEntry {
    /// `<leaf ids> : <output ids>`, e.g. `1 2 : 4 5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |refs: &[NodeRef]| {
            refs.iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(f, "{} : {}", join(&self.leaves), join(&self.outputs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiOutputCutReport {
    pub k: usize,
    pub l: usize,
    pub entries: Vec<MultiOutputCutEntry>,
    pub stats: EnumerationStats,
}

impl MultiOutputCutReport {
    /// Writes one line per entry.
    pub fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        self.entries.iter().map(|entry| format!("{}\n", entry)).collect()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize multi-output cut report: {}", e))
    }
}
