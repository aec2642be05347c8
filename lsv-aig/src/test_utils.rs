// SPDX-License-Identifier: Apache-2.0

//! Small networks shared by unit tests, integration tests and benchmarks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::network::builder::{BuilderOptions, NetworkBuilder};
use crate::network::node::{Network, Operand};

pub struct TestGraph {
    pub g: Network,
    pub i0: Operand,
    pub i1: Operand,
    pub i2: Operand,
    pub i3: Operand,
    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
    pub o: Operand,
}

/// ```text
/// a = i0 & i1    b = i1 & i2    c = i2 & i3    o = a & b
/// ```
pub fn setup_simple_graph() -> TestGraph {
    let mut nb = NetworkBuilder::new_aig("g".to_string(), BuilderOptions::opt());
    let i0 = nb.add_input("i0".to_string());
    let i1 = nb.add_input("i1".to_string());
    let i2 = nb.add_input("i2".to_string());
    let i3 = nb.add_input("i3".to_string());

    let a = nb.add_and_binary(i0, i1);
    let b = nb.add_and_binary(i1, i2);
    let c = nb.add_and_binary(i2, i3);

    let o = nb.add_and_binary(a, b);
    nb.add_output("o".to_string(), o);
    nb.add_output("c".to_string(), c);

    let g = nb.build();
    TestGraph {
        g,
        i0,
        i1,
        i2,
        i3,
        a,
        b,
        c,
        o,
    }
}

pub struct TwoGateGraph {
    pub g: Network,
    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
    pub g1: Operand,
    pub g2: Operand,
}

/// Inputs a, b, c (ids 1, 2, 3) with `g1 = a & b` (id 4) and `g2 = a & c`
/// (id 5).
pub fn setup_two_gate_graph() -> TwoGateGraph {
    let mut nb = NetworkBuilder::new_aig("two_gates".to_string(), BuilderOptions::opt());
    let a = nb.add_input("a".to_string());
    let b = nb.add_input("b".to_string());
    let c = nb.add_input("c".to_string());
    let g1 = nb.add_and_binary(a, b);
    let g2 = nb.add_and_binary(a, c);
    nb.add_output("g1".to_string(), g1);
    nb.add_output("g2".to_string(), g2);
    TwoGateGraph {
        g: nb.build(),
        a,
        b,
        c,
        g1,
        g2,
    }
}

pub struct SharedFaninGraph {
    pub g: Network,
    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
    pub shared: Operand,
    pub left: Operand,
    pub right: Operand,
}

/// ```text
/// shared = a & b    left = shared & c    right = shared & !c
/// ```
///
/// `left` and `right` read the same leaves through different polarities, so
/// they share every non-trivial cut.
pub fn setup_shared_fanin_graph() -> SharedFaninGraph {
    let mut nb = NetworkBuilder::new_aig("shared".to_string(), BuilderOptions::opt());
    let a = nb.add_input("a".to_string());
    let b = nb.add_input("b".to_string());
    let c = nb.add_input("c".to_string());
    let shared = nb.add_and_binary(a, b);
    let left = nb.add_and_binary(shared, c);
    let right = nb.add_and_binary(shared, c.negate());
    nb.add_output("left".to_string(), left);
    nb.add_output("right".to_string(), right);
    SharedFaninGraph {
        g: nb.build(),
        a,
        b,
        c,
        shared,
        left,
        right,
    }
}

/// Builds a left-leaning AND chain `((i0 & i1) & i0) & i1 ...` of the given
/// depth over two inputs.
pub fn setup_and_chain(depth: usize) -> Network {
    let mut nb = NetworkBuilder::new_aig("chain".to_string(), BuilderOptions::opt());
    let i0 = nb.add_input("i0".to_string());
    let i1 = nb.add_input("i1".to_string());
    let mut current = nb.add_and_binary(i0, i1);
    for i in 1..depth {
        let leaf = if i % 2 == 0 { i1 } else { i0 };
        current = nb.add_and_binary(current, leaf);
    }
    nb.add_output("o".to_string(), current);
    nb.build()
}

/// Builds a random strashed AIG with `input_count` inputs and roughly
/// `and_count` AND gates. Deterministic for a given seed.
pub fn setup_random_aig(seed: u64, input_count: usize, and_count: usize) -> Network {
    assert!(input_count >= 2, "random AIG needs at least two inputs");
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut nb = NetworkBuilder::new_aig(format!("random_{}", seed), BuilderOptions::opt());
    let mut available: Vec<Operand> = (0..input_count)
        .map(|i| nb.add_input(format!("i{}", i)))
        .collect();
    for _ in 0..and_count {
        let lhs = available[rng.gen_range(0..available.len())];
        let rhs = available[rng.gen_range(0..available.len())];
        let lhs = if rng.gen_bool(0.3) { lhs.negate() } else { lhs };
        let rhs = if rng.gen_bool(0.3) { rhs.negate() } else { rhs };
        let result = nb.add_and_binary(lhs, rhs);
        let fresh = Operand::from(result.node);
        if nb.nodes[result.node.id].is_and() && !available.contains(&fresh) {
            available.push(fresh);
        }
    }
    let last = *available.last().expect("at least the inputs are available");
    nb.add_output("o".to_string(), last);
    nb.build()
}
